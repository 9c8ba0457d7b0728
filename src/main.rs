use std::path::Path;

use procedural_terrain::config::TerrainConfig;

use bevy::{
    pbr::{FogFalloff, FogSettings},
    prelude::*,
};
use bevy_atmosphere::prelude::*;
use bevy_fly_camera::{FlyCamera, FlyCameraPlugin};

const CONFIG_PATH: &str = "terrain.ron";

#[derive(Component)]
struct TerrainEdges;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugin(AtmospherePlugin)
        .add_plugin(FlyCameraPlugin)
        .add_startup_system(setup_terrain)
        .add_system(toggle_fog)
        .add_system(toggle_edges)
        .add_system(adjust_speed)
        .run();
}

fn load_config() -> TerrainConfig {
    if !Path::new(CONFIG_PATH).exists() {
        info!("{CONFIG_PATH} not found, using default terrain");
        return TerrainConfig::default();
    }

    match TerrainConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}, using default terrain");
            TerrainConfig::default()
        }
    }
}

fn setup_terrain(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = load_config();

    let terrain = match config.build() {
        Ok(terrain) => terrain,
        Err(err) => {
            error!("failed to build terrain: {err}");
            return;
        }
    };

    // Mesh is z-up, Bevy is y-up.
    let transform = Transform::from_rotation(Quat::from_rotation_x(-0.5 * std::f32::consts::PI));

    let edges = terrain.mesh.to_wireframe_mesh();

    commands.spawn(PbrBundle {
        mesh: meshes.add(terrain.mesh.into_render_mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::rgb(0.55, 0.62, 0.42),
            perceptual_roughness: 0.8,
            ..default()
        }),
        transform,
        ..default()
    });

    commands
        .spawn(PbrBundle {
            mesh: meshes.add(edges),
            material: materials.add(StandardMaterial {
                base_color: Color::rgb(0.15, 0.15, 0.15),
                unlit: true,
                ..default()
            }),
            transform,
            visibility: Visibility::Hidden,
            ..default()
        })
        .insert(TerrainEdges);

    let eye_height = terrain.grid.max_height() + 10.;
    add_camera(&mut commands, eye_height);
    add_lights(&mut commands);
}

fn add_camera(commands: &mut Commands, start_height: f32) {
    commands
        .spawn(Camera3dBundle {
            transform: Transform::from_xyz(0., start_height, 60.),
            ..default()
        })
        .insert(FlyCamera::default())
        .insert(AtmosphereCamera::default())
        .insert(terrain_fog());
}

fn terrain_fog() -> FogSettings {
    FogSettings {
        color: Color::rgba(0.95, 0.95, 0.95, 1.),
        falloff: FogFalloff::Linear {
            start: 20.,
            end: 150.,
        },
        ..default()
    }
}

fn add_lights(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 20000.,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_rotation_x(-0.25 * std::f32::consts::PI)),
        ..default()
    });
}

fn toggle_fog(
    mut commands: Commands,
    keys: Res<Input<KeyCode>>,
    cameras: Query<(Entity, Option<&FogSettings>), With<FlyCamera>>,
) {
    if !keys.just_pressed(KeyCode::F) {
        return;
    }

    for (entity, fog) in &cameras {
        if fog.is_some() {
            commands.entity(entity).remove::<FogSettings>();
        } else {
            commands.entity(entity).insert(terrain_fog());
        }
    }
}

fn toggle_edges(keys: Res<Input<KeyCode>>, mut edges: Query<&mut Visibility, With<TerrainEdges>>) {
    if !keys.just_pressed(KeyCode::L) {
        return;
    }

    for mut visibility in &mut edges {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Visible,
            _ => Visibility::Hidden,
        };
    }
}

fn adjust_speed(keys: Res<Input<KeyCode>>, mut cameras: Query<&mut FlyCamera>) {
    let factor = if keys.pressed(KeyCode::Equals) {
        1.05
    } else if keys.pressed(KeyCode::Minus) {
        1. / 1.05
    } else {
        return;
    };

    for mut camera in &mut cameras {
        camera.max_speed *= factor;
    }
}

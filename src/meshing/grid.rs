use bevy::prelude::Vec3;

use super::{normals, DegenerateNormals, Domain, TerrainMeshData};
use crate::error::Result;
use crate::heightmap::ElevationGrid;

/// Stretches `terrain` over `domain` and triangulates it, two triangles per cell.
pub fn heightmap_to_grid_mesh(
    terrain: &ElevationGrid,
    domain: Domain,
    degenerate: DegenerateNormals,
) -> Result<TerrainMeshData> {
    domain.validate()?;

    let n = terrain.subdivisions();
    let dx = (domain.max_x - domain.min_x) / n as f32;
    let dy = (domain.max_y - domain.min_y) / n as f32;

    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    for i in 0..=n {
        for j in 0..=n {
            vertices.push(Vec3::new(
                domain.min_x + dx * j as f32,
                domain.min_y + dy * i as f32,
                terrain.height_at(i, j),
            ));
        }
    }

    let mut normals = normals::accumulate(terrain, dx, dy);
    normals::normalize(&mut normals, degenerate)?;

    let mut triangles = Vec::with_capacity(6 * n * n);
    let idx = |i: usize, j: usize| -> u32 { (i * (n + 1) + j) as u32 };

    for i in 0..n {
        for j in 0..n {
            // Add quad to indices
            triangles.extend([idx(i, j), idx(i, j + 1), idx(i + 1, j)]);
            triangles.extend([idx(i, j + 1), idx(i + 1, j + 1), idx(i + 1, j)]);
        }
    }

    Ok(TerrainMeshData {
        vertices,
        triangles,
        normals,
    })
}

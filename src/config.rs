//! Terrain configuration, loadable from RON.
//!
//! Every field is optional in the file; missing ones take the values of
//! [`TerrainConfig::default`], which reproduce the classic 128-cell terrain
//! over `[-50, 50]^2`.
//!
//! ```
//! use procedural_terrain::config::TerrainConfig;
//!
//! let config = TerrainConfig::from_ron_str("(subdivisions: 64, synthesis: (seed: 7))").unwrap();
//! assert_eq!(config.subdivisions, 64);
//! assert_eq!(config.synthesis.seed, 7);
//! assert_eq!(config.synthesis.roughness, 12.5);
//! ```

use std::path::Path;

use bevy::log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::generation::{diamond_square_terrain, DiamondSquareSettings};
use crate::heightmap::ElevationGrid;
use crate::meshing::{heightmap_to_grid_mesh, DegenerateNormals, Domain, TerrainMeshData};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid subdivision count `n`; must be a power of two.
    pub subdivisions: usize,
    pub domain: Domain,
    pub synthesis: DiamondSquareSettings,
    pub degenerate_normals: DegenerateNormals,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            subdivisions: 128,
            domain: Domain::default(),
            synthesis: DiamondSquareSettings::default(),
            degenerate_normals: DegenerateNormals::default(),
        }
    }
}

/// A synthesized grid together with its mesh.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub grid: ElevationGrid,
    pub mesh: TerrainMeshData,
}

impl TerrainConfig {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|source| TerrainError::Config {
            origin: "<string>".to_string(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        ron::from_str(&text).map_err(|source| TerrainError::Config {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Synthesizes the grid, then meshes it.
    pub fn build(&self) -> Result<Terrain> {
        let grid = diamond_square_terrain(self.subdivisions, &self.synthesis)?;
        let mesh = heightmap_to_grid_mesh(&grid, self.domain, self.degenerate_normals)?;

        info!(
            "terrain: {} vertices, {} triangles, heights {:.2}..{:.2}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            grid.min_height(),
            grid.max_height()
        );

        Ok(Terrain { grid, mesh })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::DiamondOffset;

    #[test]
    fn full_config_parses() {
        let config = TerrainConfig::from_ron_str(
            r#"(
                subdivisions: 32,
                domain: (min_x: 0.0, max_x: 10.0, min_y: -5.0, max_y: 5.0),
                synthesis: (roughness: 4.0, decay: 2.0, diamond_offset: Independent, seed: 99),
                degenerate_normals: Reject,
            )"#,
        )
        .unwrap();

        assert_eq!(config.subdivisions, 32);
        assert_eq!(config.domain, Domain::new(0., 10., -5., 5.));
        assert_eq!(config.synthesis.diamond_offset, DiamondOffset::Independent);
        assert_eq!(config.synthesis.decay, 2.);
        assert_eq!(config.degenerate_normals, DegenerateNormals::Reject);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(TerrainConfig::from_ron_str("()").unwrap(), TerrainConfig::default());
    }

    #[test]
    fn bad_config_is_an_error() {
        let err = TerrainConfig::from_ron_str("(subdivisions: \"many\")").unwrap_err();
        assert!(matches!(err, TerrainError::Config { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TerrainConfig::load("definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, TerrainError::Io(_)));
    }

    #[test]
    fn build_meshes_the_grid() {
        let config = TerrainConfig {
            subdivisions: 8,
            ..Default::default()
        };
        let terrain = config.build().unwrap();
        assert_eq!(terrain.grid.subdivisions(), 8);
        assert_eq!(terrain.mesh.vertex_count(), 81);
        assert_eq!(terrain.mesh.triangle_count(), 128);
    }

    #[test]
    fn build_propagates_grid_errors() {
        let config = TerrainConfig {
            subdivisions: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.build(),
            Err(TerrainError::InvalidGridSize { n: 10, .. })
        ));
    }
}

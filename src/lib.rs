//! Procedural terrain: diamond-square heightmaps and their triangle meshes.
//!
//! ```
//! use procedural_terrain::{
//!     generation::synthesize,
//!     meshing::{heightmap_to_grid_mesh, DegenerateNormals, Domain},
//! };
//!
//! let grid = synthesize(16, 12.5).unwrap();
//! let mesh = heightmap_to_grid_mesh(&grid, Domain::default(), DegenerateNormals::Substitute).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 17 * 17);
//! assert_eq!(mesh.triangle_count(), 2 * 16 * 16);
//! assert_eq!(mesh.edges().len(), 6 * mesh.triangle_count());
//! ```

pub mod config;
pub mod error;
pub mod generation;
mod heightmap;
pub mod meshing;

pub use error::{Result, TerrainError};
pub use heightmap::{ElevationGrid, MAX_SUBDIVISIONS};

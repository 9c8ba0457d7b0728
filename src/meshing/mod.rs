mod grid;
mod lines;
mod normals;

pub use grid::heightmap_to_grid_mesh;
pub use lines::lines_from_indexed_triangles;
pub use normals::DegenerateNormals;

use bevy::{
    prelude::*,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Rectangle in the xy-plane the grid is stretched over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min_x: -50.,
            max_x: 50.,
            min_y: -50.,
            max_y: 50.,
        }
    }
}

impl Domain {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        // Finite bounds can still overflow to an infinite extent.
        let extents = [self.max_x - self.min_x, self.max_y - self.min_y];
        if extents.iter().any(|e| !e.is_finite() || *e == 0.) {
            return Err(TerrainError::InvalidDomain {
                min_x: self.min_x,
                max_x: self.max_x,
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        Ok(())
    }
}

/// Triangle mesh of a terrain grid, z-up, vertices in row-major grid order.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMeshData {
    vertices: Vec<Vec3>,
    triangles: Vec<u32>,
    normals: Vec<Vec3>,
}

impl TerrainMeshData {
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle vertex indices, three per triangle.
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Positions as `x, y, z` triples, ready for a vertex buffer.
    pub fn positions_flat(&self) -> Vec<f32> {
        flatten(&self.vertices)
    }

    pub fn normals_flat(&self) -> Vec<f32> {
        flatten(&self.normals)
    }

    /// Wireframe index pairs, three per triangle.
    pub fn edges(&self) -> Vec<u32> {
        lines::edges_of(&self.triangles)
    }

    pub fn into_render_mesh(self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.vertices);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);

        mesh.set_indices(Some(Indices::U32(self.triangles)));

        mesh
    }

    /// Line-list mesh over the same vertices, one segment per triangle side.
    pub fn to_wireframe_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::LineList);

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.vertices.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());

        mesh.set_indices(Some(Indices::U32(self.edges())));

        mesh
    }
}

fn flatten(vectors: &[Vec3]) -> Vec<f32> {
    vectors.iter().flat_map(|v| v.to_array()).collect()
}

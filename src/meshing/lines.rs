use crate::error::{Result, TerrainError};

/// Turns a triangle index list into line index pairs: (a, b), (b, c), (c, a) per triangle.
///
/// Sides shared by neighbouring triangles are emitted once for each of them.
pub fn lines_from_indexed_triangles(triangles: &[u32]) -> Result<Vec<u32>> {
    if triangles.len() % 3 != 0 {
        return Err(TerrainError::MalformedTriangleList {
            len: triangles.len(),
        });
    }
    Ok(edges_of(triangles))
}

pub(super) fn edges_of(triangles: &[u32]) -> Vec<u32> {
    triangles
        .chunks_exact(3)
        .flat_map(|t| [t[0], t[1], t[1], t[2], t[2], t[0]])
        .collect()
}

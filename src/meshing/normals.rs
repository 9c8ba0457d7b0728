use bevy::{log::warn, prelude::Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::heightmap::ElevationGrid;

/// What to do with a vertex whose accumulated normal has no direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateNormals {
    /// Use +Z instead.
    #[default]
    Substitute,
    /// Fail with [`TerrainError::DegenerateNormal`].
    Reject,
}

/// Sums the (area weighted) face normals of every triangle into its three vertices.
///
/// Within a cell, corners `(i, j)` and `(i+1, j+1)` each get one face only.
pub(super) fn accumulate(terrain: &ElevationGrid, dx: f32, dy: f32) -> Vec<Vec3> {
    let n = terrain.subdivisions();
    let h = terrain.heights();
    let idx = |i: usize, j: usize| i * (n + 1) + j;

    let mut normals = vec![Vec3::ZERO; (n + 1) * (n + 1)];

    for i in 0..n {
        for j in 0..n {
            // Lower-left triangle: (i, j), (i, j+1), (i+1, j)
            let along_x = Vec3::new(dx, 0., h[[i, j + 1]] - h[[i, j]]);
            let along_y = Vec3::new(0., dy, h[[i + 1, j]] - h[[i, j]]);
            let lower = along_x.cross(along_y);

            for v in [idx(i, j), idx(i, j + 1), idx(i + 1, j)] {
                normals[v] += lower;
            }

            // Upper-right triangle: (i, j+1), (i+1, j+1), (i+1, j)
            let back_x = Vec3::new(-dx, 0., h[[i + 1, j]] - h[[i + 1, j + 1]]);
            let back_y = Vec3::new(0., -dy, h[[i, j + 1]] - h[[i + 1, j + 1]]);
            let upper = back_x.cross(back_y);

            for v in [idx(i, j + 1), idx(i + 1, j + 1), idx(i + 1, j)] {
                normals[v] += upper;
            }
        }
    }

    normals
}

/// Scales every accumulated normal to unit length.
pub(super) fn normalize(normals: &mut [Vec3], policy: DegenerateNormals) -> Result<()> {
    let mut substituted = 0;

    for (vertex, normal) in normals.iter_mut().enumerate() {
        match normal.try_normalize() {
            Some(unit) => *normal = unit,
            None => match policy {
                DegenerateNormals::Substitute => {
                    *normal = Vec3::Z;
                    substituted += 1;
                }
                DegenerateNormals::Reject => {
                    return Err(TerrainError::DegenerateNormal { vertex });
                }
            },
        }
    }

    if substituted > 0 {
        warn!("{substituted} degenerate vertex normals replaced with +Z");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_grid_accumulates_straight_up() {
        let grid = ElevationGrid::flat(2).unwrap();
        let normals = accumulate(&grid, 0.5, 0.5);

        // Corner (0, 0) touches one triangle, the centre touches six.
        assert_eq!(normals[0], Vec3::new(0., 0., 0.25));
        assert_eq!(normals[4], Vec3::new(0., 0., 1.5));
        assert!(normals.iter().all(|v| v.x == 0. && v.y == 0. && v.z > 0.));
    }

    #[test]
    fn normalize_yields_unit_vectors() {
        let mut normals = vec![Vec3::new(3., 0., 4.), Vec3::new(0., 0., 0.25)];
        normalize(&mut normals, DegenerateNormals::Reject).unwrap();
        assert!(normals[0].abs_diff_eq(Vec3::new(0.6, 0., 0.8), 1e-6));
        assert_eq!(normals[1], Vec3::Z);
    }

    #[test]
    fn degenerate_policy() {
        let mut normals = vec![Vec3::Z, Vec3::ZERO, Vec3::new(f32::NAN, 0., 1.)];
        assert!(matches!(
            normalize(&mut normals.clone(), DegenerateNormals::Reject),
            Err(TerrainError::DegenerateNormal { vertex: 1 })
        ));

        normalize(&mut normals, DegenerateNormals::Substitute).unwrap();
        assert_eq!(normals, vec![Vec3::Z; 3]);
    }
}

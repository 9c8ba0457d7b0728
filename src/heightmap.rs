use ndarray::{Array2, ArrayView2};

use crate::error::{Result, TerrainError};

/// Largest subdivision count whose `(n+1)^2` vertices still fit `u32` indices.
pub const MAX_SUBDIVISIONS: usize = 65_535;

/// Square grid of `(n+1) x (n+1)` elevations, indexed `[[row, column]]`.
///
/// Only the synthesizer mutates a grid; everything downstream sees it read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationGrid(Array2<f32>);

impl ElevationGrid {
    /// An all-zero grid for `n` subdivisions.
    pub fn flat(n: usize) -> Result<Self> {
        check_subdivisions(n)?;
        Ok(Self(Array2::zeros((n + 1, n + 1))))
    }

    /// Wraps existing heights. The array must be square with a side of `2^k + 1`.
    pub fn from_array(heights: Array2<f32>) -> Result<Self> {
        let (rows, cols) = heights.dim();
        if rows != cols {
            return Err(TerrainError::InvalidGridSize {
                n: rows.saturating_sub(1),
                reason: "elevation grid must be square",
            });
        }
        check_subdivisions(rows.saturating_sub(1))?;
        Ok(Self(heights))
    }

    /// Grid subdivision count `n`.
    pub fn subdivisions(&self) -> usize {
        self.0.dim().0 - 1
    }

    pub fn dim(&self) -> (usize, usize) {
        self.0.dim()
    }

    pub fn height_at(&self, i: usize, j: usize) -> f32 {
        self.0[[i, j]]
    }

    pub fn heights(&self) -> ArrayView2<'_, f32> {
        self.0.view()
    }

    pub fn min_height(&self) -> f32 {
        self.0.fold(f32::INFINITY, |acc, &v| acc.min(v))
    }

    pub fn max_height(&self) -> f32 {
        self.0.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v))
    }

    pub(crate) fn heights_mut(&mut self) -> &mut Array2<f32> {
        &mut self.0
    }
}

/// `n` must halve cleanly down to unit cells and keep vertex ids within `u32`.
pub(crate) fn check_subdivisions(n: usize) -> Result<()> {
    if !n.is_power_of_two() {
        return Err(TerrainError::InvalidGridSize {
            n,
            reason: "subdivision count must be a power of two",
        });
    }
    if n > MAX_SUBDIVISIONS {
        return Err(TerrainError::InvalidGridSize {
            n,
            reason: "too many vertices for 32-bit indices",
        });
    }
    Ok(())
}

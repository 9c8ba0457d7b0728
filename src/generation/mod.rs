mod diamond_square;

use bevy::log::debug;
use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::heightmap::{check_subdivisions, ElevationGrid};

/// How the four edge midpoints of one square draw their random offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiamondOffset {
    /// One draw shared by all four edge midpoints. Matches the classic terrain output.
    #[default]
    Shared,
    /// An independent draw per edge midpoint (left, right, top, bottom).
    Independent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiamondSquareSettings {
    /// Initial displacement magnitude; draws fall in `[0, roughness)`.
    pub roughness: f32,
    /// Divisor applied to the magnitude at each recursion depth.
    pub decay: f32,
    pub diamond_offset: DiamondOffset,
    pub seed: u64,
}

impl Default for DiamondSquareSettings {
    fn default() -> Self {
        Self {
            roughness: 12.5,
            decay: 1.5,
            diamond_offset: DiamondOffset::Shared,
            seed: 0,
        }
    }
}

impl DiamondSquareSettings {
    fn validate(&self) -> Result<()> {
        if !self.roughness.is_finite() || self.roughness < 0. {
            return Err(TerrainError::invalid_param(
                "roughness",
                self.roughness,
                "must be finite and non-negative",
            ));
        }
        if !self.decay.is_finite() || self.decay <= 0. {
            return Err(TerrainError::invalid_param(
                "decay",
                self.decay,
                "must be finite and positive",
            ));
        }
        Ok(())
    }
}

/// Synthesizes an `(n+1) x (n+1)` grid with default settings and the default seed.
pub fn synthesize(n: usize, roughness: f32) -> Result<ElevationGrid> {
    diamond_square_terrain(
        n,
        &DiamondSquareSettings {
            roughness,
            ..Default::default()
        },
    )
}

/// Synthesizes a grid using a xoshiro generator seeded from `settings.seed`.
pub fn diamond_square_terrain(n: usize, settings: &DiamondSquareSettings) -> Result<ElevationGrid> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(settings.seed);
    synthesize_with(n, settings, &mut rng)
}

/// Synthesizes a grid drawing every random offset from `rng`.
///
/// `settings.seed` is ignored here; the caller owns the random source.
pub fn synthesize_with<R: RngCore + ?Sized>(
    n: usize,
    settings: &DiamondSquareSettings,
    rng: &mut R,
) -> Result<ElevationGrid> {
    check_subdivisions(n)?;
    settings.validate()?;

    debug!(
        "diamond-square: n={n} roughness={} decay={} offset={:?} seed={}",
        settings.roughness, settings.decay, settings.diamond_offset, settings.seed
    );

    let mut grid = ElevationGrid::flat(n)?;
    diamond_square::fill(grid.heights_mut(), settings, rng);

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_roughness_stays_flat() {
        let grid = synthesize(16, 0.).unwrap();
        assert_eq!(grid.dim(), (17, 17));
        assert!(grid.heights().iter().all(|&h| h == 0.));
    }

    #[test]
    fn same_seed_same_grid() {
        let settings = DiamondSquareSettings {
            seed: 42,
            ..Default::default()
        };
        let a = diamond_square_terrain(32, &settings).unwrap();
        let b = diamond_square_terrain(32, &settings).unwrap();
        assert_eq!(a, b);

        let other = diamond_square_terrain(
            32,
            &DiamondSquareSettings {
                seed: 43,
                ..settings
            },
        )
        .unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn corners_are_never_displaced() {
        let grid = synthesize(64, 12.5).unwrap();
        for (i, j) in [(0, 0), (0, 64), (64, 0), (64, 64)] {
            assert_eq!(grid.height_at(i, j), 0.);
        }
    }

    #[test]
    fn heights_are_finite_and_non_negative() {
        let grid = synthesize(128, 12.5).unwrap();
        assert!(grid.heights().iter().all(|h| h.is_finite() && *h >= 0.));
        assert!(grid.max_height() > 0.);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            synthesize(12, 1.),
            Err(TerrainError::InvalidGridSize { n: 12, .. })
        ));
        assert!(matches!(
            synthesize(8, -1.),
            Err(TerrainError::InvalidParameter {
                name: "roughness",
                ..
            })
        ));
        assert!(matches!(
            synthesize(8, f32::NAN),
            Err(TerrainError::InvalidParameter { .. })
        ));

        let settings = DiamondSquareSettings {
            decay: 0.,
            ..Default::default()
        };
        assert!(matches!(
            diamond_square_terrain(8, &settings),
            Err(TerrainError::InvalidParameter { name: "decay", .. })
        ));
    }

    #[test]
    fn independent_offsets_change_the_terrain() {
        let shared = diamond_square_terrain(16, &DiamondSquareSettings::default()).unwrap();
        let independent = diamond_square_terrain(
            16,
            &DiamondSquareSettings {
                diamond_offset: DiamondOffset::Independent,
                ..Default::default()
            },
        )
        .unwrap();
        assert_ne!(shared, independent);
    }
}

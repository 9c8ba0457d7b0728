use ndarray::Array2;
use rand_core::RngCore;

use super::{DiamondOffset, DiamondSquareSettings};

// Axis-aligned square of grid points, x is the row index.
#[derive(Clone, Copy, Debug)]
struct Square {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl Square {
    fn midpoint(&self) -> (usize, usize) {
        ((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    // Quadrants in fill order: low/low, high/low, high/high, low/high.
    fn quadrants(&self) -> [Square; 4] {
        let (mx, my) = self.midpoint();
        [
            Square { x0: self.x0, y0: self.y0, x1: mx, y1: my },
            Square { x0: mx, y0: self.y0, x1: self.x1, y1: my },
            Square { x0: mx, y0: my, x1: self.x1, y1: self.y1 },
            Square { x0: self.x0, y0: my, x1: mx, y1: self.y1 },
        ]
    }
}

/// Uniform value in `[0, 1)` from the top 24 bits of one `u32` draw.
fn unit_random<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1. / (1u32 << 24) as f32)
}

pub(super) fn fill<R: RngCore + ?Sized>(
    heights: &mut Array2<f32>,
    settings: &DiamondSquareSettings,
    rng: &mut R,
) {
    let n = heights.dim().0 - 1;
    let root = Square { x0: 0, y0: 0, x1: n, y1: n };

    displace(heights, root, settings.roughness, settings, rng);
}

fn displace<R: RngCore + ?Sized>(
    heights: &mut Array2<f32>,
    square: Square,
    size: f32,
    settings: &DiamondSquareSettings,
    rng: &mut R,
) {
    if square.y1 - square.y0 <= 1 {
        return;
    }

    let Square { x0, y0, x1, y1 } = square;
    let (mx, my) = square.midpoint();

    let c1 = heights[[x0, y0]];
    let c2 = heights[[x0, y1]];
    let c3 = heights[[x1, y1]];
    let c4 = heights[[x1, y0]];

    // Square step
    let center = (c1 + c2 + c3 + c4) / 4. + unit_random(rng) * size;
    heights[[mx, my]] = center;

    // Diamond step
    let offsets = match settings.diamond_offset {
        DiamondOffset::Shared => [unit_random(rng) * size; 4],
        DiamondOffset::Independent => [
            unit_random(rng) * size,
            unit_random(rng) * size,
            unit_random(rng) * size,
            unit_random(rng) * size,
        ],
    };

    heights[[mx, y0]] = (c1 + center + c4) / 3. + offsets[0];
    heights[[mx, y1]] = (c2 + c3 + center) / 3. + offsets[1];
    heights[[x0, my]] = (c1 + c2 + center) / 3. + offsets[2];
    heights[[x1, my]] = (c4 + center + c3) / 3. + offsets[3];

    let size = size / settings.decay;
    for quadrant in square.quadrants() {
        displace(heights, quadrant, size, settings, rng);
    }
}

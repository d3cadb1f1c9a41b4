// Seeded coherent 2D noise.
//
// Classic gradient ("Perlin") noise: a 256-entry permutation table is
// shuffled by a `MosaicRng` built from the generation seed, gradients are
// picked from eight unit directions by hashing lattice corners through the
// table, and corner contributions are blended with the quintic fade curve.
// Output is normalized from the theoretical [-sqrt(2)/2, sqrt(2)/2] range
// of unit-gradient 2D noise into [0, 1] and clamped.
//
// The field is continuous in space and fully determined by the seed: the
// shading engine samples it at scaled cell centroids, so the same seed
// always colors the same tessellation identically.
//
// **Critical constraint: determinism.** The only randomness is the
// permutation shuffle, drawn from the caller-provided seed. Sampling is
// pure f64 arithmetic with no state.

use mosaic_prng::MosaicRng;

/// Eight unit gradient directions (axes and normalized diagonals).
const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
    (-std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
];

/// Maximum magnitude of 2D gradient noise with unit gradients.
const MAX_MAGNITUDE: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// A seeded, immutable coherent noise field over the plane.
#[derive(Clone, Debug)]
pub struct NoiseField {
    /// Doubled permutation table — doubling removes the need to wrap
    /// the second-level lookups.
    perm: [u8; 512],
}

impl NoiseField {
    /// Build the field for a seed. Identical seeds produce identical
    /// fields.
    pub fn new(seed: u64) -> Self {
        let mut rng = MosaicRng::new(seed);
        let mut table: [u8; 256] = [0; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        // Fisher-Yates shuffle driven by the seeded generator.
        for i in (1..256).rev() {
            let j = rng.range_usize(0, i + 1);
            table.swap(i, j);
        }
        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);
        Self { perm }
    }

    /// Sample the field at `(x, y)`. Returns a value in [0, 1]; lattice
    /// points sample to exactly 0.5.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64).rem_euclid(256) as usize;
        let yi = (y0 as i64).rem_euclid(256) as usize;
        let fx = x - x0;
        let fy = y - y0;

        let u = fade(fx);
        let v = fade(fy);

        let n00 = self.corner(xi, yi, fx, fy);
        let n10 = self.corner(xi + 1, yi, fx - 1.0, fy);
        let n01 = self.corner(xi, yi + 1, fx, fy - 1.0);
        let n11 = self.corner(xi + 1, yi + 1, fx - 1.0, fy - 1.0);

        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        let raw = lerp(nx0, nx1, v);

        (((raw / MAX_MAGNITUDE) + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    /// Dot product of the corner's hashed gradient with the offset to the
    /// sample point.
    fn corner(&self, xi: usize, yi: usize, dx: f64, dy: f64) -> f64 {
        let hash = self.perm[self.perm[xi & 255] as usize + (yi & 255)] as usize;
        let (gx, gy) = GRADIENTS[hash & 7];
        gx * dx + gy * dy
    }
}

/// Quintic fade: `6t^5 - 15t^4 + 10t^3`, zero first and second derivative
/// at the lattice.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// Per-cell shading of the tessellation.
//
// Each usable cell gets a palette color chosen by sampling the coherent
// noise field at its centroid, shifted by the mood-driven hue rotation,
// then drawn in three layers:
//
//   1. a glow halo (blurred silhouette in the brightened cell color,
//      radius driven by energy),
//   2. the fill (alpha driven by calm),
//   3. optional grain stipple (low calm only): up to 60 jittered points
//      around the centroid, kept only when they land inside the cell,
//      drawn in a darkened low-alpha variant.
//
// Degenerate cells (fewer than three vertices) are skipped silently —
// this stage never raises user-visible errors.
//
// The stipple consumes the same generator stream that scattered the
// sites, keeping the whole render a function of the one seed. The noise
// field is seeded with the same value — see `pipeline.rs` for the
// threading.
//
// See also: `tessellate.rs` for the cells, `palette.rs` for the expanded
// palette, `raster.rs` for the draw primitives.

use crate::color::Rgb;
use crate::noise::NoiseField;
use crate::palette::ResolvedPalette;
use crate::raster::Canvas;
use crate::tessellate::{Cell, Point, Tessellation, map_linear};
use mosaic_prng::MosaicRng;

/// Background gray level behind the cells.
pub const BACKGROUND_GRAY: u8 = 250;

/// Stipple points attempted per cell when calm is low.
const STIPPLE_POINTS: usize = 60;

/// Calm threshold below which grain stipple appears.
const STIPPLE_CALM_THRESHOLD: u8 = 5;

/// Slider-derived shading parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeParams {
    pub noise_scale: f64,
    pub hue_shift_deg: f64,
    pub fill_alpha: f64,
    pub glow_radius: f64,
    pub grain_radius: f64,
    pub stipple: bool,
}

impl ShadeParams {
    /// Map the calm/energy/mood sliders onto shading parameters.
    pub fn from_sliders(calm: u8, energy: u8, mood: u8) -> Self {
        Self {
            noise_scale: noise_scale_for(calm),
            hue_shift_deg: hue_shift_for(mood),
            fill_alpha: fill_alpha_for(calm) / 255.0,
            glow_radius: glow_radius_for(energy),
            grain_radius: grain_radius_for(calm),
            stipple: calm < STIPPLE_CALM_THRESHOLD,
        }
    }
}

/// Noise frequency from calm: `[1,10] -> [0.012, 0.004]`. Higher calm
/// gives smoother, larger features.
pub fn noise_scale_for(calm: u8) -> f64 {
    map_linear(calm as f64, (1.0, 10.0), (0.012, 0.004))
}

/// Hue rotation in degrees from mood: `[1,10] -> [-45, 45]`.
pub fn hue_shift_for(mood: u8) -> f64 {
    map_linear(mood as f64, (1.0, 10.0), (-45.0, 45.0))
}

/// Fill alpha (of 255) from calm: `[1,10] -> [180, 255]`.
pub fn fill_alpha_for(calm: u8) -> f64 {
    map_linear(calm as f64, (1.0, 10.0), (180.0, 255.0))
}

/// Glow blur radius from energy: `[1,10] -> [8, 25]`.
pub fn glow_radius_for(energy: u8) -> f64 {
    map_linear(energy as f64, (1.0, 10.0), (8.0, 25.0))
}

/// Grain jitter radius from calm: `[1,10] -> [30, 5]`. Grain tightens
/// (and eventually disappears) as calm rises.
pub fn grain_radius_for(calm: u8) -> f64 {
    map_linear(calm as f64, (1.0, 10.0), (30.0, 5.0))
}

/// Palette index for a noise sample and hue shift, wrapped into range.
///
/// The hue shift can push the intermediate negative; `rem_euclid` wraps
/// it back to a valid non-negative index.
pub fn color_index(noise_value: f64, hue_shift_deg: f64, palette_len: usize) -> usize {
    debug_assert!(palette_len > 0);
    let shifted = (noise_value + hue_shift_deg / 360.0) * palette_len as f64;
    (shifted.floor() as i64).rem_euclid(palette_len as i64) as usize
}

/// Shade every usable cell of the tessellation onto the canvas.
pub fn render_cells(
    canvas: &mut Canvas,
    tessellation: &Tessellation,
    palette: &ResolvedPalette,
    noise: &NoiseField,
    rng: &mut MosaicRng,
    params: &ShadeParams,
) {
    if palette.is_empty() {
        return;
    }
    for cell in &tessellation.cells {
        let Some(centroid) = cell.centroid() else {
            continue;
        };
        let n = noise.sample(centroid.x * params.noise_scale, centroid.y * params.noise_scale);
        let index = color_index(n, params.hue_shift_deg, palette.len());
        let color = palette.color(index);

        canvas.stamp_glow(&cell.polygon, color.brighten(1.5), params.glow_radius);
        canvas.fill_convex_polygon(&cell.polygon, color, params.fill_alpha);

        if params.stipple {
            stipple_cell(canvas, cell, centroid, color, params.grain_radius, rng);
        }
    }
}

/// Grain texture: jittered points around the centroid, kept only inside
/// the cell, in a darkened low-alpha variant of the cell color.
fn stipple_cell(
    canvas: &mut Canvas,
    cell: &Cell,
    centroid: Point,
    color: Rgb,
    grain_radius: f64,
    rng: &mut MosaicRng,
) {
    let grain_color = color.darken(0.6);
    for _ in 0..STIPPLE_POINTS {
        let px = centroid.x + rng.jitter_f64(grain_radius);
        let py = centroid.y + rng.jitter_f64(grain_radius);
        if point_in_convex_polygon(&cell.polygon, Point::new(px, py)) {
            canvas.blend_pixel(px.floor() as i64, py.floor() as i64, grain_color, 0.1);
        }
    }
}

/// Convex containment: every edge cross product shares one sign (zero
/// counts as inside, so boundary points are kept).
pub fn point_in_convex_polygon(polygon: &[Point], p: Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut sign = 0.0f64;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::ResolvedPalette;
    use crate::tessellate;

    #[test]
    fn parameter_mappings_at_boundaries() {
        assert_eq!(noise_scale_for(1), 0.012);
        assert!((noise_scale_for(10) - 0.004).abs() < 1e-15);
        assert_eq!(hue_shift_for(1), -45.0);
        assert_eq!(hue_shift_for(10), 45.0);
        assert_eq!(fill_alpha_for(1), 180.0);
        assert_eq!(fill_alpha_for(10), 255.0);
        assert_eq!(glow_radius_for(1), 8.0);
        assert_eq!(glow_radius_for(10), 25.0);
        assert_eq!(grain_radius_for(1), 30.0);
        assert_eq!(grain_radius_for(10), 5.0);
    }

    #[test]
    fn stipple_only_below_threshold() {
        assert!(ShadeParams::from_sliders(4, 5, 5).stipple);
        assert!(!ShadeParams::from_sliders(5, 5, 5).stipple);
    }

    #[test]
    fn color_index_wraps_negative_intermediates() {
        // High noise with a strong negative shift must still wrap into range.
        let index = color_index(0.99, -45.0, 10);
        assert!(index < 10);
        // A saturating negative case.
        let index = color_index(0.0, -45.0, 10);
        assert!(index < 10);
    }

    #[test]
    fn color_index_in_range_over_grid() {
        for len in [1usize, 3, 10, 137] {
            for shift in [-45.0, -12.5, 0.0, 30.0, 45.0] {
                for step in 0..=20 {
                    let n = step as f64 / 20.0;
                    assert!(color_index(n, shift, len) < len);
                }
            }
        }
    }

    #[test]
    fn color_index_known_value() {
        // floor((0.99 - 0.125) * 10) = floor(8.65) = 8
        assert_eq!(color_index(0.99, -45.0, 10), 8);
        // floor((0.0 - 0.125) * 10) = -2 -> wraps to 8
        assert_eq!(color_index(0.0, -45.0, 10), 8);
    }

    #[test]
    fn containment_square() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_convex_polygon(&square, Point::new(5.0, 5.0)));
        assert!(point_in_convex_polygon(&square, Point::new(0.0, 0.0)));
        assert!(!point_in_convex_polygon(&square, Point::new(11.0, 5.0)));
        assert!(!point_in_convex_polygon(&square, Point::new(5.0, -0.1)));
    }

    #[test]
    fn containment_rejects_degenerate() {
        assert!(!point_in_convex_polygon(&[], Point::new(0.0, 0.0)));
        assert!(!point_in_convex_polygon(
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            Point::new(0.5, 0.5)
        ));
    }

    fn render_once(seed: u64) -> Canvas {
        let mut rng = MosaicRng::new(seed);
        let tess = tessellate::generate(&mut rng, 120.0, 120.0, 40, 20.0);
        let stops = [Rgb::new(255, 215, 0), Rgb::new(255, 140, 0)];
        let palette = ResolvedPalette::resolve(&stops, 40, 0.5);
        let noise = NoiseField::new(seed);
        let params = ShadeParams::from_sliders(3, 6, 8);
        let mut canvas = Canvas::new(120, 120);
        canvas.clear_gray(BACKGROUND_GRAY);
        render_cells(&mut canvas, &tess, &palette, &noise, &mut rng, &params);
        canvas
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(render_once(42), render_once(42));
    }

    #[test]
    fn different_seeds_render_differently() {
        assert_ne!(render_once(42), render_once(43));
    }

    #[test]
    fn render_covers_canvas() {
        let canvas = render_once(7);
        // Cells cover nearly everything; probe a grid of pixels and
        // require most to have left the background gray.
        let mut painted = 0;
        let mut probed = 0;
        for y in (0..120).step_by(10) {
            for x in (0..120).step_by(10) {
                probed += 1;
                let background = [BACKGROUND_GRAY, BACKGROUND_GRAY, BACKGROUND_GRAY, 255];
                if canvas.pixel(x, y) != Some(background) {
                    painted += 1;
                }
            }
        }
        assert!(painted * 10 > probed * 7, "{painted}/{probed} painted");
    }

    #[test]
    fn degenerate_cells_are_skipped() {
        // A tessellation with one empty cell renders without panic.
        let mut rng = MosaicRng::new(9);
        let mut tess = tessellate::generate(&mut rng, 60.0, 60.0, 10, 10.0);
        tess.cells[0].polygon.clear();
        let palette = ResolvedPalette::resolve(&[Rgb::new(100, 100, 200)], 10, 0.5);
        let noise = NoiseField::new(9);
        let params = ShadeParams::from_sliders(8, 5, 5);
        let mut canvas = Canvas::new(60, 60);
        canvas.clear_gray(BACKGROUND_GRAY);
        render_cells(&mut canvas, &tess, &palette, &noise, &mut rng, &params);
    }
}

// Sentiment-driven palette construction.
//
// Two stages, matching the two places the palette is touched:
//
// 1. `build_palette` — at generation time, the base emotion's scheme is
//    blended toward a secondary palette chosen by sentiment polarity,
//    with blend ratio and lightness/chroma adjustments scaled by the
//    confidence score. Length and ordering of the base scheme are
//    preserved — downstream index mapping relies on that.
// 2. `ResolvedPalette::resolve` — at render time, the blended stops are
//    interpolated through Lab space out to exactly `tile_count` colors,
//    then nudged brighter/more saturated (or darker/duller) by the
//    sentiment score. Noise buckets index into this expanded sequence.
//
// Missing palette table entries never fail: every lookup degrades toward
// `Serenity.default`, which a validated table guarantees. Pure functions
// of their inputs throughout.
//
// See also: `config.rs` for the table, `color.rs` for the blend
// operators, `shade.rs` for the noise-bucket consumer.

use crate::color::Rgb;
use crate::config::{DEFAULT_SCHEME, PaletteTable};
use crate::types::{EmotionKind, SentimentLabel, SentimentResult};

/// Confidence above which a polarity is strong enough to drive the
/// full blend; at or below it, the neutral treatment applies.
const STRONG_SENTIMENT: f64 = 0.5;

/// A blended palette plus the one-line summary shown to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteBlend {
    pub colors: Vec<Rgb>,
    pub insight: String,
}

/// Blend the base emotion's default scheme by sentiment.
///
/// POSITIVE above 0.5 blends toward Joy (brighter, more saturated);
/// NEGATIVE above 0.5 blends toward Anxiety + Sadness (darker, duller);
/// anything else takes a fixed subtle blend toward Serenity.
pub fn build_palette(
    emotion: EmotionKind,
    sentiment: &SentimentResult,
    table: &PaletteTable,
) -> PaletteBlend {
    let base = table.default_scheme(emotion);
    let score = sentiment.score.clamp(0.0, 1.0);
    let percent = score * 100.0;

    match sentiment.label {
        SentimentLabel::Positive if score > STRONG_SENTIMENT => {
            let secondary = positive_blend_palette(table);
            let colors = blend_each(base, &secondary, |c, blend| {
                c.mix(blend, score * 0.5)
                    .brighten(score * 0.7)
                    .saturate(score * 0.7)
            });
            PaletteBlend {
                colors,
                insight: format!(
                    "Sentiment: Positive ({percent:.1}%) – Blended with vibrant tones!"
                ),
            }
        }
        SentimentLabel::Negative if score > STRONG_SENTIMENT => {
            let secondary = negative_blend_palette(table);
            let colors = blend_each(base, &secondary, |c, blend| {
                c.mix(blend, score * 0.8)
                    .darken(score * 0.7)
                    .desaturate(score * 0.7)
            });
            PaletteBlend {
                colors,
                insight: format!(
                    "Sentiment: Negative ({percent:.1}%) – Blended with deeper, muted tones."
                ),
            }
        }
        _ => {
            let secondary = table.serenity_default().to_vec();
            let colors = blend_each(base, &secondary, |c, blend| {
                c.mix(blend, 0.3).desaturate(0.2)
            });
            PaletteBlend {
                colors,
                insight: format!(
                    "Sentiment: Neutral ({percent:.1}%) – Subtle blend for balance."
                ),
            }
        }
    }
}

/// Joy's default scheme, else Hope's, else Serenity's.
fn positive_blend_palette(table: &PaletteTable) -> Vec<Rgb> {
    table
        .scheme(EmotionKind::Joy, DEFAULT_SCHEME)
        .or_else(|| table.scheme(EmotionKind::Hope, DEFAULT_SCHEME))
        .unwrap_or_else(|| table.serenity_default())
        .to_vec()
}

/// Concatenation of Anxiety's and Sadness's default schemes, else
/// Serenity's.
fn negative_blend_palette(table: &PaletteTable) -> Vec<Rgb> {
    let mut combined: Vec<Rgb> = Vec::new();
    if let Some(anxiety) = table.scheme(EmotionKind::Anxiety, DEFAULT_SCHEME) {
        combined.extend_from_slice(anxiety);
    }
    if let Some(sadness) = table.scheme(EmotionKind::Sadness, DEFAULT_SCHEME) {
        combined.extend_from_slice(sadness);
    }
    if combined.is_empty() {
        combined.extend_from_slice(table.serenity_default());
    }
    combined
}

/// Apply `op(base[i], secondary[i % len])` across the base, preserving
/// its length and order. An empty secondary leaves the base untouched.
fn blend_each(
    base: &[Rgb],
    secondary: &[Rgb],
    op: impl Fn(Rgb, Rgb) -> Rgb,
) -> Vec<Rgb> {
    if secondary.is_empty() {
        return base.to_vec();
    }
    base.iter()
        .enumerate()
        .map(|(i, &c)| op(c, secondary[i % secondary.len()]))
        .collect()
}

// ---------------------------------------------------------------------------
// Render-time expansion
// ---------------------------------------------------------------------------

/// The per-render palette: the blended stops interpolated out to one
/// color per tile.
///
/// Owned exclusively by one render pass; never mutated after
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPalette {
    colors: Vec<Rgb>,
}

impl ResolvedPalette {
    /// Interpolate `stops` through Lab space to `tile_count` colors and
    /// apply the sentiment lightness/chroma nudge.
    ///
    /// Lightness shifts by `map(score, [0,1] -> [0.8,1.2]) - 1` and chroma
    /// by `map(score, [0,1] -> [0.7,1.3]) - 1`, so a 0.5 score is a no-op,
    /// high scores brighten and saturate, low scores darken and mute.
    pub fn resolve(stops: &[Rgb], tile_count: usize, sentiment_score: f64) -> Self {
        let tile_count = tile_count.max(1);
        if stops.is_empty() {
            // Unreachable through the pipeline (build_palette never
            // returns empty), but degrade to mid-gray rather than panic.
            return Self {
                colors: vec![Rgb::new(128, 128, 128); tile_count],
            };
        }
        let score = sentiment_score.clamp(0.0, 1.0);
        let brighten_amount = (0.8 + score * 0.4) - 1.0;
        let saturate_amount = (0.7 + score * 0.6) - 1.0;

        let colors = (0..tile_count)
            .map(|i| {
                let t = if tile_count == 1 {
                    0.0
                } else {
                    i as f64 / (tile_count - 1) as f64
                };
                sample_gradient(stops, t)
                    .brighten(brighten_amount)
                    .saturate(saturate_amount)
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`; indexes are produced pre-wrapped by the shading
    /// engine, so this is a plain bounds-true lookup.
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Piecewise-linear Lab interpolation across the stops at `t` in [0, 1].
fn sample_gradient(stops: &[Rgb], t: f64) -> Rgb {
    if stops.len() == 1 {
        return stops[0];
    }
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (stops.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - lo as f64;
    stops[lo].mix_lab(stops[lo + 1], frac)
}

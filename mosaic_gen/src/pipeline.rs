// End-to-end generation pipeline.
//
// Two stages, mirroring the submit/draw split of the UI this engine
// backs:
//
// - `generate`: questionnaire input + classifier + palette table ->
//   `MosaicState`. Builds the trend summaries, classifies the reflection
//   (through the memoizing cache, so identical reflections reuse their
//   result), blends the palette by sentiment, and derives the seed.
// - `render`: `MosaicState` -> `Canvas`. Derives tile count and jitter
//   from the sliders, builds the RNG and noise field from the seed,
//   tessellates, expands the palette to the tile count, and shades every
//   cell.
//
// The whole pipeline is synchronous and single-threaded; each render
// pass exclusively owns its tessellation, resolved palette, and canvas,
// so there is nothing to lock. Re-generation builds a fresh state and
// discards the old one.
//
// **Critical constraint: determinism.** Everything downstream of
// `generate` is a pure function of `MosaicState`: two `render` calls on
// the same state produce byte-identical canvases.

use crate::config::PaletteTable;
use crate::noise::NoiseField;
use crate::palette::{self, ResolvedPalette};
use crate::raster::Canvas;
use crate::seed;
use crate::sentiment::{
    CachedClassifier, SentimentClassifier, SentimentRequest, combined_sentiment_summary,
    emotional_trends,
};
use crate::shade::{self, ShadeParams};
use crate::tessellate;
use crate::types::{MosaicState, QuestionnaireInput};

/// Default square canvas size in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 450;

/// Options for a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Square canvas edge length in pixels.
    pub size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_CANVAS_SIZE,
        }
    }
}

/// A generated state plus the sentiment insight line for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    pub state: MosaicState,
    pub insight: String,
}

/// Run the generation stage: classify, blend, seed.
///
/// The classifier is consulted through its cache, so resubmitting the
/// same reflection reuses the previous `SentimentResult` and therefore
/// reproduces the same palette. Classifier failures have already been
/// absorbed into the neutral fallback by the cache wrapper.
pub fn generate<C: SentimentClassifier>(
    input: QuestionnaireInput,
    classifier: &mut CachedClassifier<C>,
    table: &PaletteTable,
) -> Generation {
    let request = SentimentRequest::new(input.reflection.clone())
        .with_summary(combined_sentiment_summary(&input));
    let sentiment = classifier.classify(&request);

    let blend = palette::build_palette(input.emotion, &sentiment, table);
    let emotional_trends = emotional_trends(&input);
    let seed = seed::seed_for(&input);

    Generation {
        state: MosaicState {
            input,
            emotional_trends,
            palette: blend.colors,
            sentiment_score: sentiment.score,
            seed,
        },
        insight: blend.insight,
    }
}

/// Run the render stage: tessellate and shade onto a fresh canvas.
pub fn render(state: &MosaicState, options: RenderOptions) -> Canvas {
    let size = options.size.max(1);
    let width = size as f64;
    let height = size as f64;

    let tile_count = tessellate::tile_count_for(state.input.control);
    let cluster_jitter = tessellate::cluster_jitter_for(state.input.social);

    // One generator stream for scatter and stipple, one noise field —
    // both built from the same seed.
    let mut rng = mosaic_prng::MosaicRng::new(state.seed as u64);
    let noise = NoiseField::new(state.seed as u64);

    let tessellation = tessellate::generate(&mut rng, width, height, tile_count, cluster_jitter);
    let palette = ResolvedPalette::resolve(&state.palette, tile_count, state.sentiment_score);
    let params = ShadeParams::from_sliders(state.input.calm, state.input.energy, state.input.mood);

    let mut canvas = Canvas::new(size as usize, size as usize);
    canvas.clear_gray(shade::BACKGROUND_GRAY);
    shade::render_cells(&mut canvas, &tessellation, &palette, &noise, &mut rng, &params);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconClassifier;
    use crate::types::EmotionKind;

    fn sample_input() -> QuestionnaireInput {
        QuestionnaireInput {
            calm: 3,
            energy: 2,
            mood: 1,
            social: 2,
            control: 3,
            emotion: EmotionKind::Sadness,
            reflection: "I feel completely lost and hopeless.".into(),
        }
    }

    #[test]
    fn generate_populates_state() {
        let mut classifier = CachedClassifier::new(LexiconClassifier);
        let table = PaletteTable::builtin();
        let generation = generate(sample_input(), &mut classifier, &table);

        let state = &generation.state;
        assert_eq!(state.seed, seed::seed_for(&sample_input()));
        assert_eq!(
            state.palette.len(),
            table.default_scheme(EmotionKind::Sadness).len()
        );
        assert!(state.emotional_trends.contains("Dominant Emotion: Sadness"));
        assert!(generation.insight.starts_with("Sentiment:"));
    }

    #[test]
    fn generate_reuses_cached_sentiment() {
        let mut classifier = CachedClassifier::new(LexiconClassifier);
        let table = PaletteTable::builtin();
        let first = generate(sample_input(), &mut classifier, &table);
        let second = generate(sample_input(), &mut classifier, &table);
        assert_eq!(first, second);
        assert_eq!(classifier.cache_len(), 1);
    }

    #[test]
    fn render_is_deterministic() {
        let mut classifier = CachedClassifier::new(LexiconClassifier);
        let table = PaletteTable::builtin();
        let generation = generate(sample_input(), &mut classifier, &table);

        let options = RenderOptions { size: 120 };
        let a = render(&generation.state, options);
        let b = render(&generation.state, options);
        assert_eq!(a, b);
    }

    #[test]
    fn render_respects_canvas_size() {
        let mut classifier = CachedClassifier::new(LexiconClassifier);
        let table = PaletteTable::builtin();
        let generation = generate(sample_input(), &mut classifier, &table);
        let canvas = render(&generation.state, RenderOptions { size: 96 });
        assert_eq!(canvas.width(), 96);
        assert_eq!(canvas.height(), 96);
    }

    #[test]
    fn default_options_use_standard_size() {
        assert_eq!(RenderOptions::default().size, 450);
    }
}

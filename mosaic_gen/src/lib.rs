// Mindful Mosaic generator.
//
// Turns a self-reported emotional questionnaire — five 1-10 sliders, a
// dominant emotion, and a free-text reflection — into a deterministic,
// seeded procedural mosaic: the reflection drives a sentiment-blended
// palette, the sliders drive tessellation density, clustering, noise
// frequency, hue rotation, glow, and grain, and one derived seed fixes
// every random decision.
//
// Architecture:
// - types.rs:      EmotionKind, sentiment types, QuestionnaireInput, MosaicState
// - color.rs:      Rgb + hex parsing and Lab/Lch color operators
// - config.rs:     PaletteTable (builtin schemes + JSON loading)
// - seed.rs:       rolling-hash seed derivation from the input tuple
// - sentiment.rs:  classifier trait, memoizing cache, lexicon classifier,
//   trend summaries
// - palette.rs:    sentiment blending + tile-count gradient expansion
// - noise.rs:      seeded coherent 2D gradient noise
// - tessellate.rs: point scatter, Bowyer-Watson Delaunay, clipped Voronoi
// - shade.rs:      per-cell color assignment, glow, grain stipple
// - raster.rs:     RGBA canvas with polygon fill and glow compositing
// - png.rs:        PNG encoding (stored-block zlib + crc32fast)
// - share.rs:      social deep links with the fixed promo text
// - pipeline.rs:   generate (input -> MosaicState) and render (state -> canvas)
//
// The generator is deterministic given a submission: identical input
// reproduces the identical image byte-for-byte.

pub mod color;
pub mod config;
pub mod noise;
pub mod palette;
pub mod pipeline;
pub mod png;
pub mod raster;
pub mod seed;
pub mod sentiment;
pub mod shade;
pub mod share;
pub mod tessellate;
pub mod types;

// Core types shared across the mosaic pipeline.
//
// Defines the dominant-emotion enumeration, sentiment classification
// results, the questionnaire input tuple, and the `MosaicState` aggregate
// handed to the renderer. All types derive `Serialize` and `Deserialize`
// so a finished state can be exported alongside its image or replayed to
// reproduce it exactly.
//
// Range validation (sliders in [1, 10], reflection length >= 10) is a
// precondition enforced by the submitting layer; the pipeline assumes
// valid input and does not re-check it.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Emotions
// ---------------------------------------------------------------------------

/// The six dominant emotions a user can report.
///
/// Each has a palette entry in the `PaletteTable`; `Serenity` doubles as
/// the terminal fallback for any lookup that misses.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EmotionKind {
    Joy,
    Anxiety,
    Anger,
    Sadness,
    Hope,
    Serenity,
}

impl EmotionKind {
    pub const ALL: [EmotionKind; 6] = [
        EmotionKind::Joy,
        EmotionKind::Anxiety,
        EmotionKind::Anger,
        EmotionKind::Sadness,
        EmotionKind::Hope,
        EmotionKind::Serenity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionKind::Joy => "Joy",
            EmotionKind::Anxiety => "Anxiety",
            EmotionKind::Anger => "Anger",
            EmotionKind::Sadness => "Sadness",
            EmotionKind::Hope => "Hope",
            EmotionKind::Serenity => "Serenity",
        }
    }
}

impl fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized emotion name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEmotionError {
    input: String,
}

impl fmt::Display for ParseEmotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown emotion: {:?}", self.input)
    }
}

impl std::error::Error for ParseEmotionError {}

impl FromStr for EmotionKind {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionKind::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEmotionError {
                input: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Three-way sentiment polarity, serialized in the classifier's wire
/// convention (`POSITIVE` / `NEGATIVE` / `NEUTRAL`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "POSITIVE")]
    Positive,
    #[serde(rename = "NEGATIVE")]
    Negative,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified sentiment: polarity plus a confidence score in [0, 1],
/// where 0.5 is neutral confidence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Questionnaire input and the generated state
// ---------------------------------------------------------------------------

/// One submitted questionnaire: five 1–10 sliders, a dominant emotion,
/// and a free-text reflection (>= 10 characters, enforced upstream).
///
/// Immutable once submitted; passed by value into the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireInput {
    pub calm: u8,
    pub energy: u8,
    pub mood: u8,
    pub social: u8,
    pub control: u8,
    pub emotion: EmotionKind,
    pub reflection: String,
}

/// The aggregate handed to the renderer: the input, a human-readable trend
/// summary, the sentiment-blended palette, the sentiment score, and the
/// derived seed.
///
/// Created once per generation and never mutated; a new submission fully
/// replaces it. The render pass expands `palette` to the tile count — see
/// `palette::ResolvedPalette`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MosaicState {
    pub input: QuestionnaireInput,
    pub emotional_trends: String,
    pub palette: Vec<Rgb>,
    pub sentiment_score: f64,
    pub seed: u32,
}

// Sentiment classification boundary.
//
// The real classifier is an external service; this module defines the
// boundary the pipeline talks through:
//
// - `SentimentClassifier`: the collaborator trait. A request carries the
//   reflection text plus an optional pre-computed summary of the
//   questionnaire metrics; a response is a polarity label and a
//   confidence score in [0, 1].
// - `CachedClassifier`: an explicit memoizing wrapper, keyed by the exact
//   reflection string. Identical reflection text is guaranteed to yield
//   the identical `SentimentResult` — the palette builder depends on that
//   contract for reproducibility. Unbounded growth is acceptable at this
//   scale; the cache lives for one session. Classifier failures are
//   absorbed here and replaced with the fixed neutral fallback, so
//   downstream code never observes an error.
// - `LexiconClassifier`: the bundled implementation — keyword hit counting
//   over the lowercased reflection. Coarse, but offline and
//   deterministic.
//
// The summary-string builders (`emotional_trends`,
// `combined_sentiment_summary`) also live here: they fold the five slider
// values into the textual shape a remote classifier consumes.

use crate::types::{QuestionnaireInput, SentimentLabel, SentimentResult};
use rustc_hash::FxHashMap;
use std::fmt;

/// Substituted whenever the underlying classifier fails.
pub const NEUTRAL_FALLBACK: SentimentResult = SentimentResult {
    label: SentimentLabel::Neutral,
    score: 0.5,
};

/// A classification request: the reflection plus an optional combined
/// summary of the questionnaire metrics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentimentRequest {
    pub reflection: String,
    pub combined_summary: Option<String>,
}

impl SentimentRequest {
    pub fn new(reflection: impl Into<String>) -> Self {
        Self {
            reflection: reflection.into(),
            combined_summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.combined_summary = Some(summary.into());
        self
    }
}

/// Error from an underlying classifier implementation.
#[derive(Clone, Debug)]
pub struct ClassifierError {
    pub message: String,
}

impl ClassifierError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sentiment classifier failed: {}", self.message)
    }
}

impl std::error::Error for ClassifierError {}

/// The external classifier collaborator.
pub trait SentimentClassifier {
    fn classify(&mut self, request: &SentimentRequest)
    -> Result<SentimentResult, ClassifierError>;
}

// ---------------------------------------------------------------------------
// Memoizing wrapper
// ---------------------------------------------------------------------------

/// Memoizes an inner classifier by exact reflection text and absorbs its
/// failures into `NEUTRAL_FALLBACK`.
///
/// The cache is passed around explicitly (owned by the application, not
/// hidden module state) and never evicts.
pub struct CachedClassifier<C> {
    inner: C,
    cache: FxHashMap<String, SentimentResult>,
}

impl<C: SentimentClassifier> CachedClassifier<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cache: FxHashMap::default(),
        }
    }

    /// Classify, consulting the cache first. Infallible: an inner error
    /// yields (and caches) the neutral fallback.
    pub fn classify(&mut self, request: &SentimentRequest) -> SentimentResult {
        if let Some(cached) = self.cache.get(&request.reflection) {
            return *cached;
        }
        let result = self.inner.classify(request).unwrap_or(NEUTRAL_FALLBACK);
        self.cache.insert(request.reflection.clone(), result);
        result
    }

    /// Number of distinct reflections classified so far.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

// ---------------------------------------------------------------------------
// Bundled lexicon classifier
// ---------------------------------------------------------------------------

const POSITIVE_WORDS: [&str; 10] = [
    "happy", "joy", "good", "great", "positive", "love", "excited", "hope", "calm", "peace",
];

const NEGATIVE_WORDS: [&str; 10] = [
    "sad",
    "lonely",
    "lost",
    "bad",
    "negative",
    "hate",
    "anxious",
    "fear",
    "stress",
    "overwhelmed",
];

/// Threshold on the signed score beyond which a polarity is assigned.
const POLARITY_THRESHOLD: f64 = 0.3;

/// Keyword-based classifier: counts positive/negative word hits in the
/// lowercased reflection, clamps the net to [-1, 1], and maps magnitude
/// to confidence.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexiconClassifier;

impl SentimentClassifier for LexiconClassifier {
    fn classify(
        &mut self,
        request: &SentimentRequest,
    ) -> Result<SentimentResult, ClassifierError> {
        let signed = reflection_sentiment(&request.reflection);
        let label = if signed > POLARITY_THRESHOLD {
            SentimentLabel::Positive
        } else if signed < -POLARITY_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        let score = (0.5 + signed.abs() / 2.0).min(1.0);
        Ok(SentimentResult { label, score })
    }
}

/// Signed sentiment of a reflection in [-1, 1] from keyword hits. Each
/// present positive word adds one, each negative word subtracts one; the
/// net count clamps to the unit range. Empty text is neutral.
pub fn reflection_sentiment(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let mut score: i32 = 0;
    for word in POSITIVE_WORDS {
        if lower.contains(word) {
            score += 1;
        }
    }
    for word in NEGATIVE_WORDS {
        if lower.contains(word) {
            score -= 1;
        }
    }
    (score as f64).clamp(-1.0, 1.0)
}

/// Mean of the five sliders recentered to [-1, 1]: each value maps through
/// `(v - 5.5) / 4.5`.
pub fn questionnaire_sentiment(input: &QuestionnaireInput) -> f64 {
    let recenter = |v: u8| (v as f64 - 5.5) / 4.5;
    [
        input.mood,
        input.calm,
        input.energy,
        input.social,
        input.control,
    ]
    .into_iter()
    .map(recenter)
    .sum::<f64>()
        / 5.0
}

/// Equal-weight combination of questionnaire and reflection sentiment,
/// with the polarity the thresholds assign to it.
pub fn combined_sentiment(input: &QuestionnaireInput) -> (SentimentLabel, f64) {
    let combined =
        (questionnaire_sentiment(input) + reflection_sentiment(&input.reflection)) / 2.0;
    let label = if combined > POLARITY_THRESHOLD {
        SentimentLabel::Positive
    } else if combined < -POLARITY_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };
    (label, combined)
}

/// The human-readable trend summary carried on `MosaicState`.
pub fn emotional_trends(input: &QuestionnaireInput) -> String {
    format!(
        "Calmness: {}/10, Energy: {}/10, Mood: {}/10, Connection: {}/10, Control: {}/10. \
         Dominant Emotion: {}. Reflection: {}",
        input.calm, input.energy, input.mood, input.social, input.control, input.emotion,
        input.reflection
    )
}

/// The combined-metrics summary passed to the classifier alongside the
/// reflection.
pub fn combined_sentiment_summary(input: &QuestionnaireInput) -> String {
    let (label, score) = combined_sentiment(input);
    format!(
        "Based on self-reported metrics (Calmness: {}/10, Energy: {}/10, Mood: {}/10, \
         Social Connection: {}/10, Control: {}/10, Dominant Emotion: {}) and reflection \
         text, the overall combined sentiment is {} with a score of {:.2}.",
        input.calm, input.energy, input.mood, input.social, input.control, input.emotion,
        label, score
    )
}

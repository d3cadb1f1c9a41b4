// Shared fixtures for the end-to-end pipeline tests.
//
// The integration tests exercise the same public API the CLI uses:
// `pipeline::generate` with a cached lexicon classifier, then
// `pipeline::render` to pixels. The only test-specific code here is the
// fixture constructors.

use mosaic_gen::types::{EmotionKind, QuestionnaireInput};

/// The documented end-to-end scenario: a low-slider Sadness submission.
pub fn sadness_scenario() -> QuestionnaireInput {
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

/// A high-slider Joy submission with a positive reflection.
pub fn joy_scenario() -> QuestionnaireInput {
    QuestionnaireInput {
        calm: 9,
        energy: 8,
        mood: 10,
        social: 9,
        control: 9,
        emotion: EmotionKind::Joy,
        reflection: "I feel absolutely fantastic and full of joy!".into(),
    }
}

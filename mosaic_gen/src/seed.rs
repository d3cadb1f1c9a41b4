// Deterministic seed derivation from questionnaire input.
//
// The full input tuple — reflection text, emotion label, and the five
// slider values — is joined with `-` into one string and hashed with the
// classic `hash * 31 + unit` rolling hash in wrapping 32-bit
// two's-complement arithmetic. The hash runs over UTF-16 code units so the
// value is identical for any text, including astral-plane characters,
// regardless of platform. The absolute value of the final hash is the
// seed.
//
// The seed is a pure function of its inputs: same submission, same seed,
// same mosaic. It feeds both `MosaicRng` (point scatter, grain stipple)
// and the noise permutation — see `pipeline.rs`.
//
// Not cryptographic; the only requirement is that near-duplicate
// reflections decorrelate, which single-character avalanche through the
// 31x rolling hash provides.

use crate::types::{EmotionKind, QuestionnaireInput};

/// Derive the generation seed from the full input tuple.
pub fn derive_seed(
    reflection: &str,
    emotion: EmotionKind,
    calm: u8,
    energy: u8,
    mood: u8,
    social: u8,
    control: u8,
) -> u32 {
    let joined =
        format!("{reflection}-{emotion}-{calm}-{energy}-{mood}-{social}-{control}");
    hash_utf16(&joined)
}

/// Derive the seed for a submitted questionnaire.
pub fn seed_for(input: &QuestionnaireInput) -> u32 {
    derive_seed(
        &input.reflection,
        input.emotion,
        input.calm,
        input.energy,
        input.mood,
        input.social,
        input.control,
    )
}

/// Rolling `hash * 31 + unit` over UTF-16 code units, wrapping in i32,
/// absolute value out.
fn hash_utf16(s: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        // hash * 31 == (hash << 5) - hash, in wrapping arithmetic.
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}

// Palette table configuration.
//
// The palette table maps each dominant emotion to one or more named color
// schemes — ordered hex color sequences whose insertion order defines the
// hue progression of the mosaic. The `"default"` scheme is the one the
// pipeline uses; the named variants (warm, cool, muted, ...) exist for
// alternative renderings.
//
// The table is static bundled data: `PaletteTable::builtin()` returns the
// shipped schemes, and `PaletteTable::from_json_str` / `load` read a
// user-provided table from JSON without any network access. Loaded tables
// are validated at construction: `Serenity.default` must exist and be
// non-empty, because it is the terminal fallback for every lookup. With
// that invariant held at the boundary, lookups can degrade silently and
// never fail.
//
// See also: `palette.rs` for the sentiment blending that consumes the
// table, `types.rs` for `EmotionKind`.

use crate::color::Rgb;
use crate::types::EmotionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the scheme every pipeline lookup targets.
pub const DEFAULT_SCHEME: &str = "default";

/// Emotion -> scheme name -> ordered color sequence.
///
/// Construction goes through `builtin()` or the validated loaders, so a
/// `PaletteTable` always contains a non-empty `Serenity.default`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteTable {
    schemes: BTreeMap<EmotionKind, BTreeMap<String, Vec<Rgb>>>,
}

/// Error raised when loading or validating a palette table.
#[derive(Debug)]
pub enum PaletteTableError {
    /// The file could not be read.
    Io(io::Error),
    /// The JSON did not match the table shape.
    Parse(serde_json::Error),
    /// The table is missing the guaranteed `Serenity.default` fallback.
    MissingFallback,
}

impl fmt::Display for PaletteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteTableError::Io(e) => write!(f, "failed to read palette table: {e}"),
            PaletteTableError::Parse(e) => write!(f, "failed to parse palette table: {e}"),
            PaletteTableError::MissingFallback => {
                write!(f, "palette table has no non-empty Serenity.default scheme")
            }
        }
    }
}

impl std::error::Error for PaletteTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteTableError::Io(e) => Some(e),
            PaletteTableError::Parse(e) => Some(e),
            PaletteTableError::MissingFallback => None,
        }
    }
}

impl PaletteTable {
    /// The shipped palette table: six emotions, each with a `default`
    /// scheme of three colors plus one named variant.
    pub fn builtin() -> Self {
        let hex = |codes: &[&str]| -> Vec<Rgb> {
            codes
                .iter()
                .map(|c| match Rgb::from_hex(c) {
                    Ok(color) => color,
                    Err(_) => unreachable!("builtin palette hex is well-formed"),
                })
                .collect()
        };
        let mut schemes: BTreeMap<EmotionKind, BTreeMap<String, Vec<Rgb>>> = BTreeMap::new();
        let mut insert = |emotion: EmotionKind, scheme: &str, codes: &[&str]| {
            schemes
                .entry(emotion)
                .or_default()
                .insert(scheme.to_string(), hex(codes));
        };

        insert(EmotionKind::Joy, DEFAULT_SCHEME, &["#FFD700", "#FFA500", "#FF8C00"]);
        insert(EmotionKind::Joy, "warm", &["#FF4500", "#FF6347"]);
        insert(EmotionKind::Anxiety, DEFAULT_SCHEME, &["#E74C3C", "#C0392B", "#922B21"]);
        insert(EmotionKind::Anxiety, "cool", &["#3498DB", "#2980B9"]);
        insert(EmotionKind::Sadness, DEFAULT_SCHEME, &["#5DADE2", "#2874A6", "#154360"]);
        insert(EmotionKind::Sadness, "muted", &["#95A5A6", "#7F8C8D"]);
        insert(EmotionKind::Anger, DEFAULT_SCHEME, &["#FF3B30", "#C70039", "#900C3F"]);
        insert(EmotionKind::Anger, "fiery", &["#E67E22", "#D35400"]);
        insert(EmotionKind::Hope, DEFAULT_SCHEME, &["#58D68D", "#2ECC71", "#239B56"]);
        insert(EmotionKind::Hope, "pastel", &["#A9DFBF", "#7DCEA0"]);
        insert(EmotionKind::Serenity, DEFAULT_SCHEME, &["#AED6F1", "#85C1E9", "#5DADE2"]);
        insert(EmotionKind::Serenity, "ocean", &["#48C9B0", "#45B39D"]);

        Self { schemes }
    }

    /// Parse a table from JSON and validate the fallback invariant.
    ///
    /// Format: `{"Joy": {"default": ["#ffd700", ...], "warm": [...]}, ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, PaletteTableError> {
        let table: PaletteTable =
            serde_json::from_str(json).map_err(PaletteTableError::Parse)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, PaletteTableError> {
        let json = std::fs::read_to_string(path).map_err(PaletteTableError::Io)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), PaletteTableError> {
        match self.scheme(EmotionKind::Serenity, DEFAULT_SCHEME) {
            Some(colors) if !colors.is_empty() => Ok(()),
            _ => Err(PaletteTableError::MissingFallback),
        }
    }

    /// Look up a named scheme. Returns `None` when absent or empty.
    pub fn scheme(&self, emotion: EmotionKind, name: &str) -> Option<&[Rgb]> {
        self.schemes
            .get(&emotion)
            .and_then(|s| s.get(name))
            .filter(|colors| !colors.is_empty())
            .map(Vec::as_slice)
    }

    /// The `default` scheme for an emotion, falling back to
    /// `Serenity.default` when the emotion has none. Never empty for a
    /// validated table.
    pub fn default_scheme(&self, emotion: EmotionKind) -> &[Rgb] {
        if let Some(colors) = self.scheme(emotion, DEFAULT_SCHEME) {
            return colors;
        }
        self.serenity_default()
    }

    /// The guaranteed terminal fallback scheme.
    pub fn serenity_default(&self) -> &[Rgb] {
        self.scheme(EmotionKind::Serenity, DEFAULT_SCHEME)
            .unwrap_or(&[])
    }
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

use serde::{Deserialize, Serialize};

/// Normalization switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Drop every character that is neither alphanumeric nor whitespace
    #[serde(default)]
    pub strip_punctuation: bool,
}

/// Canonicalizes raw text before lexical comparison.
///
/// Lower-cases the input and, when configured, strips punctuation. Never
/// fails; empty input yields empty output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    options: NormalizeOptions,
}

impl TextNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Strict variant: lower-case and strip punctuation
    pub fn strict() -> Self {
        Self::new(NormalizeOptions {
            strip_punctuation: true,
        })
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    pub fn normalize(&self, text: &str) -> String {
        let lower = text.to_lowercase();

        if !self.options.strip_punctuation {
            return lower;
        }

        lower
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect()
    }
}

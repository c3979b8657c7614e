use rapidfuzz::distance::jaro_winkler;

use crate::ranking::Scorer;

/// Rapidfuzz Jaro-Winkler scorer.
///
/// Character-level, so it still separates short descriptions that share no
/// whole words. Empty input scores 0 like the TF-IDF scorer.
pub struct JaroWinklerScorer;

impl JaroWinklerScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JaroWinklerScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for JaroWinklerScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        jaro_winkler::normalized_similarity(a.chars(), b.chars()).clamp(0.0, 1.0)
    }

    fn name(&self) -> &str {
        "jaro-winkler"
    }
}

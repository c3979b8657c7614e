use std::collections::BTreeMap;

use crate::ranking::Scorer;

/// Number of documents in every fit: the two texts being compared
const PAIR_DOCS: f64 = 2.0;

/// TF-IDF + cosine scorer.
///
/// The vocabulary is refit for every pair, so idf only distinguishes terms
/// shared by both texts (idf = 1) from terms unique to one of them
/// (idf = 1 + ln 1.5). Scores are therefore not comparable with a
/// corpus-wide fit, but rank candidates the same way.
#[derive(Debug, Clone)]
pub struct TfidfScorer {
    min_token_len: usize,
}

impl TfidfScorer {
    pub fn new() -> Self {
        Self { min_token_len: 1 }
    }

    /// Drop tokens shorter than `len` chars (2 matches the usual `\w\w+` pattern)
    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len.max(1);
        self
    }

    pub fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    /// Split into maximal runs of word characters
    pub fn tokenize<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        let min_len = self.min_token_len;
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(move |token| !token.is_empty() && token.chars().count() >= min_len)
    }

    /// Fit a vocabulary on exactly these two texts and weight both
    pub fn fit_pair<'t>(&self, left: &'t str, right: &'t str) -> PairVectors<'t> {
        let left_counts = self.term_counts(left);
        let right_counts = self.term_counts(right);

        let mut vocabulary: Vec<&'t str> = left_counts
            .keys()
            .chain(right_counts.keys())
            .copied()
            .collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        let mut left_weights = Vec::with_capacity(vocabulary.len());
        let mut right_weights = Vec::with_capacity(vocabulary.len());

        for term in &vocabulary {
            let tf_left = left_counts.get(term).copied().unwrap_or(0) as f64;
            let tf_right = right_counts.get(term).copied().unwrap_or(0) as f64;
            let df = (tf_left > 0.0) as u8 + (tf_right > 0.0) as u8;
            let idf = smooth_idf(df);

            left_weights.push(tf_left * idf);
            right_weights.push(tf_right * idf);
        }

        PairVectors {
            vocabulary,
            left: left_weights,
            right: right_weights,
        }
    }

    fn term_counts<'t>(&self, text: &'t str) -> BTreeMap<&'t str, usize> {
        let mut counts = BTreeMap::new();
        for token in self.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for TfidfScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for TfidfScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        let vectors = self.fit_pair(a, b);
        cosine_similarity(&vectors.left, &vectors.right)
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

/// Weighted vectors for one compared pair, aligned on `vocabulary`
#[derive(Debug, Clone)]
pub struct PairVectors<'t> {
    /// Sorted union of both texts' terms
    pub vocabulary: Vec<&'t str>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

/// ln((1 + n) / (1 + df)) + 1
fn smooth_idf(df: u8) -> f64 {
    ((1.0 + PAIR_DOCS) / (1.0 + df as f64)).ln() + 1.0
}

/// Cosine similarity; 0.0 when either vector is all-zero
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a > 0.0 && norm_b > 0.0 {
        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

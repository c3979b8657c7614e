pub mod fallback;
pub mod tfidf;

use std::sync::Arc;

use crate::config::{MatchOptions, ScorerKind};
use crate::core::CandidateRecord;
use crate::error::{MatchError, Result};
use crate::normalize::TextNormalizer;

pub use fallback::JaroWinklerScorer;
pub use tfidf::{cosine_similarity, TfidfScorer};

/// Pairwise text similarity primitive
pub trait Scorer: Send + Sync {
    /// Score two normalized texts, 0.0 (unrelated) to 1.0 (identical)
    fn score(&self, a: &str, b: &str) -> f64;

    /// Get scorer name for logging
    fn name(&self) -> &str;
}

/// Winner of a candidate scan
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub index: usize,
    pub candidate: &'a CandidateRecord,
    pub score: f64,
}

/// Scores candidate descriptions against a source text and keeps the best
#[derive(Clone)]
pub struct SimilarityRanker {
    scorer: Arc<dyn Scorer>,
    normalizer: TextNormalizer,
}

impl SimilarityRanker {
    pub fn new(scorer: Arc<dyn Scorer>, normalizer: TextNormalizer) -> Self {
        Self { scorer, normalizer }
    }

    pub fn from_options(options: &MatchOptions) -> Self {
        let scorer: Arc<dyn Scorer> = match options.scorer {
            ScorerKind::Tfidf => {
                Arc::new(TfidfScorer::new().with_min_token_len(options.min_token_len))
            }
            ScorerKind::JaroWinkler => Arc::new(JaroWinklerScorer::new()),
        };

        Self::new(scorer, TextNormalizer::new(options.normalize_options()))
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn name(&self) -> &str {
        self.scorer.name()
    }

    pub fn score_similarity(&self, text_a: &str, text_b: &str) -> f64 {
        self.scorer.score(text_a, text_b)
    }

    /// Arg-max over `candidates` in slice order.
    ///
    /// `source_text` must already be normalized; each description is
    /// normalized here. The first candidate to reach the top score wins.
    /// A candidate without a description aborts the scan.
    pub fn find_best_match<'a>(
        &self,
        source_text: &str,
        candidates: &'a [CandidateRecord],
    ) -> Result<Option<RankedCandidate<'a>>> {
        let mut best_score = -1.0;
        let mut best = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let description = candidate
                .description
                .as_deref()
                .ok_or(MatchError::MissingField {
                    index,
                    field: "description",
                })?;

            let text = self.normalizer.normalize(description);
            let score = self.scorer.score(source_text, &text);

            tracing::debug!(
                "Candidate #{} '{}' scored {:.4} ({})",
                index,
                candidate.display_name(),
                score,
                self.scorer.name()
            );

            if score > best_score {
                best_score = score;
                best = Some(RankedCandidate {
                    index,
                    candidate,
                    score,
                });
            }
        }

        Ok(best)
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::from_options(&MatchOptions::default())
    }
}

impl std::fmt::Debug for SimilarityRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityRanker")
            .field("scorer", &self.scorer.name())
            .field("normalizer", &self.normalizer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, description: &str) -> CandidateRecord {
        CandidateRecord::new(title, description)
    }

    #[test]
    fn test_scenario_picks_related_candidate() {
        let ranker = SimilarityRanker::default();
        let candidates = vec![
            candidate("A", "a zk rollup compresses state"),
            candidate("B", "unrelated weather forecast"),
        ];

        let best = ranker
            .find_best_match("zk compression rollup state", &candidates)
            .unwrap()
            .unwrap();

        assert_eq!(best.candidate.title, "A");
        assert_eq!(best.index, 0);
        assert!(best.score > 0.0);
    }

    #[test]
    fn test_empty_candidates() {
        let ranker = SimilarityRanker::default();
        assert!(ranker.find_best_match("zk", &[]).unwrap().is_none());
    }

    #[test]
    fn test_tie_keeps_first() {
        let ranker = SimilarityRanker::default();
        let candidates = vec![candidate("first", "x"), candidate("second", "x")];

        let best = ranker.find_best_match("x", &candidates).unwrap().unwrap();
        assert_eq!(best.candidate.title, "first");
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_all_zero_scores_return_first() {
        let ranker = SimilarityRanker::default();
        let candidates = vec![candidate("first", "alpha"), candidate("second", "beta")];

        let best = ranker.find_best_match("gamma", &candidates).unwrap().unwrap();
        assert_eq!(best.candidate.title, "first");
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_later_better_candidate_replaces_best() {
        let ranker = SimilarityRanker::default();
        let candidates = vec![
            candidate("weak", "solana"),
            candidate("strong", "solana nft dao"),
            candidate("tie", "solana nft dao"),
        ];

        let best = ranker.find_best_match("solana nft dao", &candidates).unwrap().unwrap();
        assert_eq!(best.candidate.title, "strong");
        assert_eq!(best.index, 1);
    }

    #[test]
    fn test_missing_description_errors_with_index() {
        let ranker = SimilarityRanker::default();
        let mut broken = candidate("broken", "");
        broken.description = None;
        let candidates = vec![candidate("ok", "zk"), broken, candidate("never", "zk")];

        let err = ranker.find_best_match("zk", &candidates).unwrap_err();
        assert!(matches!(
            err,
            MatchError::MissingField { index: 1, field: "description" }
        ));
    }

    #[test]
    fn test_descriptions_are_normalized() {
        let ranker = SimilarityRanker::default();
        let candidates = vec![candidate("upper", "ZK ROLLUP")];

        let best = ranker.find_best_match("zk rollup", &candidates).unwrap().unwrap();
        assert!((best.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_strip_punctuation_option() {
        let options = MatchOptions {
            strip_punctuation: true,
            ..MatchOptions::default()
        };
        let ranker = SimilarityRanker::from_options(&options);
        let candidates = vec![candidate("loko", "ZK-Lokomotive!")];

        // "zklokomotive" is one token once the hyphen is gone
        let best = ranker.find_best_match("zklokomotive", &candidates).unwrap().unwrap();
        assert!((best.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_candidates_untouched() {
        let ranker = SimilarityRanker::default();
        let candidates = vec![candidate("A", "MiXeD Case, Text!")];
        let before = candidates.clone();

        ranker.find_best_match("mixed", &candidates).unwrap();
        assert_eq!(candidates, before);
    }

    #[test]
    fn test_scorer_selection() {
        let jw = SimilarityRanker::from_options(&MatchOptions {
            scorer: ScorerKind::JaroWinkler,
            ..MatchOptions::default()
        });
        assert_eq!(jw.name(), "jaro-winkler");
        assert_eq!(SimilarityRanker::default().name(), "tfidf");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::CandidateRecord;

/// Best-match report with scan metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    /// The winning candidate
    pub candidate: CandidateRecord,

    /// Position of the winner in the candidate set
    pub index: usize,

    /// Similarity score (0.0 - 1.0)
    pub score: f64,

    /// Number of candidates scored
    pub candidates_scanned: usize,

    /// Scorer used (tfidf, jaro-winkler)
    pub ranking_method: String,

    /// Scan latency in milliseconds
    pub latency_ms: f64,

    /// When the match was made
    #[serde(default = "Utc::now")]
    pub matched_at: DateTime<Utc>,
}

impl MatchResponse {
    pub fn new(candidate: CandidateRecord, index: usize, score: f64) -> Self {
        Self {
            candidate,
            index,
            score,
            candidates_scanned: 0,
            ranking_method: String::from("unknown"),
            latency_ms: 0.0,
            matched_at: Utc::now(),
        }
    }

    /// Set ranking method
    pub fn with_ranking_method(mut self, method: impl Into<String>) -> Self {
        self.ranking_method = method.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.candidate.title
    }

    pub fn url(&self) -> &str {
        &self.candidate.url
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "{} - {:.3} (#{} of {}) [{}]",
            self.candidate.display_name(),
            self.score,
            self.index,
            self.candidates_scanned,
            self.ranking_method,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_response_creation() {
        let candidate = CandidateRecord::new("Superteam", "earn bounties").with_url("https://dial.to");
        let response = MatchResponse::new(candidate, 2, 0.42).with_ranking_method("tfidf");

        assert_eq!(response.title(), "Superteam");
        assert_eq!(response.url(), "https://dial.to");
        assert_eq!(response.index, 2);
        assert_eq!(response.ranking_method, "tfidf");
    }

    #[test]
    fn test_display() {
        let mut response = MatchResponse::new(CandidateRecord::new("A", "x"), 0, 1.0)
            .with_ranking_method("tfidf");
        response.candidates_scanned = 3;

        assert_eq!(response.display(), "A - 1.000 (#0 of 3) [tfidf]");
    }
}

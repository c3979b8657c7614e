//! # Blink Matcher
//!
//! Matches a zk-compression / solfhe analysis record against a catalog of
//! blinks and surfaces the single best one:
//! - Per-pair TF-IDF vectors scored by cosine similarity
//! - Optional Jaro-Winkler fallback scorer
//! - Pluggable record loaders and candidate sources (JSON file, dataset hub)
//! - Keyword -> blink link lookup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use blink_matcher::{BlinkMatcher, MatchOptions, providers::FileCandidateSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let matcher = BlinkMatcher::with_source(
//!         Arc::new(FileCandidateSource::new("blinks.json")),
//!         MatchOptions::default(),
//!     );
//!
//!     if let Some(best) = matcher.run("solfhe.json", "Blink").await? {
//!         println!("Found: {} - {}", best.title(), best.url());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod keywords;
pub mod normalize;
pub mod providers;
pub mod ranking;

// Re-export primary types
pub use config::{MatchOptions, MatcherConfig, ScorerKind};
pub use crate::core::{CandidateRecord, MatchResponse, SourceRecord};
pub use engine::{match_best, BlinkMatcher};
pub use error::{MatchError, Result};
pub use keywords::{BlinkHit, BlinkLinkTable};
pub use normalize::{NormalizeOptions, TextNormalizer};
pub use ranking::{RankedCandidate, Scorer, SimilarityRanker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

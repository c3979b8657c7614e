//! Matcher configuration.
//!
//! Everything has a default, so an empty YAML file (or no file at all) is a
//! valid configuration:
//!
//! ```yaml
//! tag: Blink
//! catalog_path: blinks.json
//! options:
//!   strip_punctuation: true
//!   scorer: tfidf
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{MatchError, Result};
use crate::normalize::NormalizeOptions;

/// Tag blink catalogs are published under
pub const DEFAULT_TAG: &str = "Blink";

/// Similarity primitive used by the ranker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ScorerKind {
    /// Per-pair TF-IDF vectors compared by cosine similarity
    #[default]
    Tfidf,
    /// Character-level Jaro-Winkler similarity
    JaroWinkler,
}

/// Options for a single match invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Strip non-alphanumeric, non-whitespace characters before scoring
    pub strip_punctuation: bool,

    /// Scoring primitive
    pub scorer: ScorerKind,

    /// Shortest token (in chars) kept by the TF-IDF tokenizer
    pub min_token_len: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            strip_punctuation: false,
            scorer: ScorerKind::Tfidf,
            min_token_len: 1,
        }
    }
}

impl MatchOptions {
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strip_punctuation: self.strip_punctuation,
        }
    }
}

/// File-level configuration for the CLI and [`crate::BlinkMatcher`] wiring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub options: MatchOptions,

    /// Candidate tag to fetch
    pub tag: String,

    /// Local JSON catalog (tag -> candidates)
    pub catalog_path: Option<PathBuf>,

    /// Dataset hub base URL
    pub hub_url: Option<String>,

    /// HTTP timeout for hub requests
    pub timeout_secs: u64,

    /// Replaces the built-in keyword -> blink link table
    pub blink_links: Option<BTreeMap<String, String>>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            options: MatchOptions::default(),
            tag: DEFAULT_TAG.to_string(),
            catalog_path: None,
            hub_url: None,
            timeout_secs: 10,
            blink_links: None,
        }
    }
}

impl MatcherConfig {
    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MatchError::NotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&raw)?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            return Err(MatchError::Config("tag must not be empty".to_string()));
        }
        if self.options.min_token_len == 0 {
            return Err(MatchError::Config(
                "options.min_token_len must be at least 1".to_string(),
            ));
        }
        if self.catalog_path.is_some() && self.hub_url.is_some() {
            return Err(MatchError::Config(
                "catalog_path and hub_url are mutually exclusive".to_string(),
            ));
        }
        Ok(())
    }
}

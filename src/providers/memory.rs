use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::CandidateRecord;
use crate::error::{MatchError, Result};
use crate::providers::{fold_tag, CandidateSource};

/// In-memory candidate sets keyed by tag (case-insensitive)
#[derive(Debug, Clone, Default)]
pub struct StaticCandidateSource {
    sets: HashMap<String, Vec<CandidateRecord>>,
}

impl StaticCandidateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: &str, candidates: Vec<CandidateRecord>) -> Self {
        self.insert(tag, candidates);
        self
    }

    pub fn insert(&mut self, tag: &str, candidates: Vec<CandidateRecord>) {
        self.sets.insert(fold_tag(tag), candidates);
    }
}

#[async_trait]
impl CandidateSource for StaticCandidateSource {
    async fn fetch(&self, tag: &str) -> Result<Vec<CandidateRecord>> {
        match self.sets.get(&fold_tag(tag)) {
            Some(candidates) if !candidates.is_empty() => Ok(candidates.clone()),
            _ => Err(MatchError::NoData(tag.to_string())),
        }
    }

    fn name(&self) -> &str {
        "static"
    }
}

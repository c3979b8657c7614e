use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::MatchOptions;
use crate::core::{CandidateRecord, MatchResponse, SourceRecord};
use crate::error::Result;
use crate::providers::{CandidateSource, JsonFileLoader, RecordLoader};
use crate::ranking::SimilarityRanker;

/// Pick the candidate whose description best matches `source`.
///
/// The record is serialized to JSON text, normalized, and scored against
/// every candidate description in order. `None` only for an empty set.
pub fn match_best(
    source: &SourceRecord,
    candidates: &[CandidateRecord],
    options: &MatchOptions,
) -> Result<Option<CandidateRecord>> {
    let ranker = SimilarityRanker::from_options(options);
    let source_text = ranker.normalizer().normalize(&source.to_text());

    Ok(ranker
        .find_best_match(&source_text, candidates)?
        .map(|best| best.candidate.clone()))
}

/// Load -> fetch -> match orchestrator with injected collaborators
pub struct BlinkMatcher {
    loader: Arc<dyn RecordLoader>,
    source: Arc<dyn CandidateSource>,
    ranker: SimilarityRanker,
}

impl BlinkMatcher {
    pub fn new(
        loader: Arc<dyn RecordLoader>,
        source: Arc<dyn CandidateSource>,
        options: MatchOptions,
    ) -> Self {
        Self {
            loader,
            source,
            ranker: SimilarityRanker::from_options(&options),
        }
    }

    /// JSON file loader with the given candidate source
    pub fn with_source(source: Arc<dyn CandidateSource>, options: MatchOptions) -> Self {
        Self::new(Arc::new(JsonFileLoader::new()), source, options)
    }

    /// Replace the ranker (custom scorer or normalizer)
    pub fn with_ranker(mut self, ranker: SimilarityRanker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn ranker(&self) -> &SimilarityRanker {
        &self.ranker
    }

    /// Match a record already in memory against an explicit candidate set
    pub fn match_record(
        &self,
        record: &SourceRecord,
        candidates: &[CandidateRecord],
    ) -> Result<Option<MatchResponse>> {
        let start = Instant::now();

        let source_text = self.ranker.normalizer().normalize(&record.to_text());
        let Some(best) = self.ranker.find_best_match(&source_text, candidates)? else {
            tracing::info!("No candidates to match");
            return Ok(None);
        };

        let mut response = MatchResponse::new(best.candidate.clone(), best.index, best.score)
            .with_ranking_method(self.ranker.name());
        response.candidates_scanned = candidates.len();
        response.latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::info!("Best match: {}", response.display());
        Ok(Some(response))
    }

    /// Load the record at `path`, fetch candidates tagged `tag`, return the best
    pub async fn run(&self, path: impl AsRef<Path>, tag: &str) -> Result<Option<MatchResponse>> {
        let path = path.as_ref();

        let record = self.loader.load(path)?;
        tracing::debug!("Loaded record from {}", path.display());

        let candidates = self.source.fetch(tag).await?;
        tracing::debug!(
            "Source {} returned {} candidates for '{}'",
            self.source.name(),
            candidates.len(),
            tag
        );

        self.match_record(&record, &candidates)
    }
}

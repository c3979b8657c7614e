use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::{CandidateRecord, SourceRecord};
use crate::error::{MatchError, Result};
use crate::providers::{fold_tag, CandidateSource, RecordLoader};

/// Reads a source record from a JSON file
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileLoader;

impl JsonFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl RecordLoader for JsonFileLoader {
    fn load(&self, path: &Path) -> Result<SourceRecord> {
        let raw = std::fs::read_to_string(path).map_err(|e| not_found_or_io(path, e))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| MatchError::parse(path.display().to_string(), e))?;

        let record = SourceRecord::from_value(value).ok_or_else(|| {
            MatchError::parse(path.display().to_string(), "expected a JSON object")
        })?;

        tracing::debug!("Loaded record with {} fields from {}", record.fields().len(), path.display());
        Ok(record)
    }
}

/// Candidate catalog stored as a JSON object of `tag -> [candidates]`.
///
/// ```json
/// { "Blink": [ { "title": "...", "description": "...", "url": "..." } ] }
/// ```
///
/// Tags are compared case-insensitively.
#[derive(Debug, Clone)]
pub struct FileCandidateSource {
    path: PathBuf,
}

impl FileCandidateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_catalog(&self, raw: &str, tag: &str) -> Result<Vec<CandidateRecord>> {
        let origin = self.path.display().to_string();

        let catalog: Value = serde_json::from_str(raw).map_err(|e| MatchError::parse(&origin, e))?;
        let sets = catalog
            .as_object()
            .ok_or_else(|| MatchError::parse(&origin, "expected an object of tag -> candidates"))?;

        let wanted = fold_tag(tag);
        let Some((_, entries)) = sets.iter().find(|(key, _)| fold_tag(key) == wanted) else {
            return Err(MatchError::NoData(tag.to_string()));
        };

        let candidates: Vec<CandidateRecord> = serde_json::from_value(entries.clone())
            .map_err(|e| MatchError::parse(format!("{} [{}]", origin, tag), e))?;

        if candidates.is_empty() {
            return Err(MatchError::NoData(tag.to_string()));
        }

        Ok(candidates)
    }
}

#[async_trait]
impl CandidateSource for FileCandidateSource {
    async fn fetch(&self, tag: &str) -> Result<Vec<CandidateRecord>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| not_found_or_io(&self.path, e))?;

        let candidates = self.parse_catalog(&raw, tag)?;
        tracing::debug!(
            "Catalog {} returned {} candidates for '{}'",
            self.path.display(),
            candidates.len(),
            tag
        );
        Ok(candidates)
    }

    fn name(&self) -> &str {
        "file"
    }
}

fn not_found_or_io(path: &Path, err: std::io::Error) -> MatchError {
    if err.kind() == ErrorKind::NotFound {
        MatchError::NotFound(path.to_path_buf())
    } else {
        MatchError::Io(err)
    }
}

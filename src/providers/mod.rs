pub mod file;
pub mod hub;
pub mod memory;

use async_trait::async_trait;
use std::path::Path;

use crate::core::{CandidateRecord, SourceRecord};
use crate::error::Result;

pub use file::{FileCandidateSource, JsonFileLoader};
pub use hub::HubCandidateSource;
pub use memory::StaticCandidateSource;

/// Case-folded tag key shared by every tag-keyed source
pub(crate) fn fold_tag(tag: &str) -> String {
    tag.to_lowercase()
}

/// Loads the analysis record to be matched
pub trait RecordLoader: Send + Sync {
    /// Fails with `NotFound` for a missing path, `Parse` for bad content
    fn load(&self, path: &Path) -> Result<SourceRecord>;
}

/// Supplies candidate records (local catalog, dataset hub, ...)
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetch candidates published under `tag`; `NoData` when there are none
    async fn fetch(&self, tag: &str) -> Result<Vec<CandidateRecord>>;

    /// Get source name
    fn name(&self) -> &str;
}

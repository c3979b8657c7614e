pub mod record;
pub mod match_response;

pub use record::{CandidateRecord, SourceRecord};
pub use match_response::MatchResponse;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Analysis result to be matched (zk-compression / solfhe output).
///
/// Any JSON object is accepted; the only thing the matcher needs is its
/// text serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SourceRecord(Map<String, Value>);

impl SourceRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from an arbitrary JSON value, which must be an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON text used as the comparison document
    pub fn to_text(&self) -> String {
        // A map of JSON values always serializes
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for SourceRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Catalog entry eligible to be matched against a source record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CandidateRecord {
    /// Free text compared against the source record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Blink / action link
    #[serde(default)]
    pub url: String,

    /// Any other catalog fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            "<untitled>"
        } else {
            &self.title
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Matched company, shaped from the first non-null of its field aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub name: Option<String>,
    pub industry: Option<String>,
    /// Bucket string or raw employee count, whichever the record carries.
    pub size: Option<Value>,
    pub location: Option<String>,
}

/// Matched person. Missing fields shape to empty strings, matching what the
/// assistant front-end expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub full_name: String,
    pub designation: String,
    pub email: String,
    pub linkedin: String,
    /// Raw employment entries, passed through verbatim.
    pub employment: Value,
}

/// Result of one search call. Empty lists are a valid, successful outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub companies: Vec<CompanySummary>,
    pub people: Vec<PersonSummary>,
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: SearchResults,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

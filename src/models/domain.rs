use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single filter element: the conversational extraction layer emits
/// strings most of the time, but numbers and booleans show up too and are
/// stringified during normalization. Anything else (null, objects) lands in
/// the catch-all and contributes no constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterScalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

/// A text filter value: a single scalar or a list (list semantics are
/// logical OR). `Many` is tried first so the scalar catch-all never swallows
/// lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Many(Vec<FilterScalar>),
    One(FilterScalar),
}

/// Company-size range with both naming conventions the extraction layer has
/// produced over time. `gte`/`lte` win over `min`/`max` when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

/// Company-size filter: either an interpreted range object or an opaque
/// legacy string (e.g. "51-200") which is deliberately not parsed as a range.
/// Any other shape (bare number, boolean, list) is carried unparsed and
/// contributes no constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanySizeFilter {
    Range(SizeRange),
    Opaque(String),
    Other(serde_json::Value),
}

/// The ICP filter object extracted from a conversation. Filters are built per
/// search call and never persisted by the engine itself; the prospect-list
/// collaborator stores them alongside the results it snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IcpFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<CompanySizeFilter>,
}

/// Organization record as ingestion writes it. The stores themselves stay
/// schemaless (legacy rows carry other field names); this is the canonical
/// shape for newly ingested data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    pub name: String,
    pub domain: Option<String>,
    pub industry: Option<String>,
    /// Size bucket string, e.g. "51-200".
    pub size: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    /// Origin tags: "vault", "user-upload", "import".
    #[serde(default)]
    pub fetched_from: Vec<String>,
    /// None = globally visible, Some = visible only to that owner.
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Structured email entry. Legacy rows may instead hold bare strings in the
/// `emails` list; alias resolution handles both when shaping output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailInfo {
    pub value: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub fetched: bool,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneInfo {
    pub value: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub fetched: bool,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

fn default_status() -> String {
    "active".to_string()
}

/// One employment entry. The first entry of a person's list is treated as
/// their current position; the list carries no chronological guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employment {
    pub company_id: String,
    pub title: String,
    #[serde(rename = "from", default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(rename = "to", default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default)]
    pub expired: bool,
}

/// Individual record as ingestion writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub person_id: String,
    pub full_name: String,
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub emails: Vec<EmailInfo>,
    #[serde(default)]
    pub phones: Vec<PhoneInfo>,
    #[serde(default)]
    pub employment: Vec<Employment>,
    pub seniority: Option<String>,
    pub department: Option<String>,
    pub country: Option<String>,
    /// None = globally visible, Some = visible only to that owner.
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

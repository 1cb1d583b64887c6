//! Field alias tables for the heterogeneous legacy datasets.
//!
//! The same semantic field shows up under several historical names depending
//! on which import produced the record (vault spreadsheets kept their original
//! column headers, later ingestion normalized to snake_case). Each table is an
//! ordered list of candidate paths, first non-null wins.

use serde_json::Value;

use crate::core::query::{values_at, Document};

/// Owner field carrying the multi-tenant visibility rule.
pub const OWNER_FIELD: &str = "user_id";

/// Company display-name aliases, priority order.
pub const COMPANY_NAME_FIELDS: &[&str] = &["name", "Company", "company", "company_name"];

/// Company industry aliases.
pub const COMPANY_INDUSTRY_FIELDS: &[&str] = &["industry", "Industry"];

/// Company location/country aliases.
pub const COMPANY_LOCATION_FIELDS: &[&str] = &["location", "country", "Country"];

/// Company size aliases used for output shaping (bucket string first).
pub const COMPANY_SIZE_FIELDS: &[&str] = &["size", "employee_count", "# Employees"];

/// Numeric employee-count aliases a size range is applied to. The bucket
/// string field is deliberately not here: range bounds are numeric comparisons
/// and never coerce bucket strings.
pub const COMPANY_SIZE_RANGE_FIELDS: &[&str] = &["employee_count", "# Employees"];

/// Identifier-like company fields whose values may appear on the people side
/// as employment/company references.
pub const COMPANY_ID_FIELDS: &[&str] =
    &["company_id", "companyId", "person_id", "personId", "id", "_id"];

/// Person title aliases (current employment first, then flat legacy columns).
pub const PERSON_TITLE_FIELDS: &[&str] = &["employment.title", "Designation", "Title"];

/// People-side company-name aliases a name-based company predicate fans out
/// across.
pub const PERSON_COMPANY_NAME_FIELDS: &[&str] =
    &["Company", "company", "company_name", "employment.company"];

/// People-side company-identifier aliases matched exactly against collected
/// company ids.
pub const PERSON_COMPANY_ID_FIELDS: &[&str] =
    &["employment.company_id", "company_id", "person_id", "_company_id"];

/// LinkedIn URL aliases.
pub const PERSON_LINKEDIN_FIELDS: &[&str] = &["linkedin_url", "linkedin", "LinkedIn"];

/// First non-empty text value among the aliased top-level fields. Numeric
/// values are stringified; whitespace-only strings are skipped.
pub fn first_text(doc: &Document, fields: &[&'static str]) -> Option<String> {
    for field in fields {
        if let Some(value) = doc.get(*field) {
            if let Some(text) = as_text(value) {
                return Some(text);
            }
        }
    }
    None
}

/// First non-null raw value among the aliased fields (dotted paths allowed).
pub fn first_value<'a>(doc: &'a Document, fields: &[&'static str]) -> Option<&'a Value> {
    for field in fields {
        if let Some(value) = values_at(doc, field).into_iter().find(|v| !v.is_null()) {
            return Some(value);
        }
    }
    None
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Render an identifier-like value the way the people side stores it.
pub fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Person's primary email: first entry of the structured `emails` list
/// (object with `value`/`email`, or a bare legacy string), falling back to the
/// flat legacy columns.
pub fn first_email(doc: &Document) -> Option<String> {
    if let Some(Value::Array(emails)) = doc.get("emails") {
        if let Some(first) = emails.first() {
            return match first {
                Value::Object(entry) => entry
                    .get("value")
                    .or_else(|| entry.get("email"))
                    .and_then(as_text),
                other => as_text(other),
            };
        }
    }
    first_text(doc, &["Email", "email"])
}

/// Person's current title: the first employment entry (positional, not
/// chronological — the data carries no ordering guarantee) under any of its
/// title aliases, falling back to the flat legacy columns.
pub fn first_title(doc: &Document) -> Option<String> {
    let entry = match doc.get("employment") {
        Some(Value::Array(list)) => list.first(),
        Some(v @ Value::Object(_)) => Some(v),
        _ => None,
    };
    if let Some(Value::Object(entry)) = entry {
        for key in ["title", "Designation", "Title"] {
            if let Some(text) = entry.get(key).and_then(as_text) {
                return Some(text);
            }
        }
    }
    first_text(doc, &["Designation", "Title"])
}

/// Person's LinkedIn URL under any alias.
pub fn first_linkedin(doc: &Document) -> Option<String> {
    first_text(doc, PERSON_LINKEDIN_FIELDS)
}

/// Person's display name: the canonical field, or the concatenated legacy
/// first/last columns.
pub fn full_name(doc: &Document) -> String {
    if let Some(name) = first_text(doc, &["full_name"]) {
        return name;
    }
    let first = first_text(doc, &["First Name"]).unwrap_or_default();
    let last = first_text(doc, &["Last Name"]).unwrap_or_default();
    format!("{} {}", first, last).trim().to_string()
}

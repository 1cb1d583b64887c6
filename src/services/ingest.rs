//! Row ingestion: pre-parsed spreadsheet rows become company and person
//! records. Each row gets a structured outcome (imported or skipped with a
//! reason) aggregated into an [`ImportSummary`]; nothing is silently dropped.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::core::fields::OWNER_FIELD;
use crate::core::query::{Condition, Document};
use crate::models::{Company, EmailInfo, Employment, Person};
use crate::services::store::{DocumentCollection, StoreError};

/// One pre-parsed row. Spreadsheet/file handling lives upstream; rows arrive
/// here already split into columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportRow {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub employee_count: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingName,
    MissingEmail,
    MissingCompany,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based index into the submitted batch.
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub companies_added: usize,
    pub people_added: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Map a raw employee count to the size-bucket string the dataset uses.
pub fn size_bucket(employee_count: i64) -> &'static str {
    match employee_count {
        i64::MIN..=49 => "1-50",
        50..=199 => "51-200",
        200..=499 => "201-500",
        500..=999 => "501-1000",
        1000..=4999 => "1001-5000",
        _ => "5000+",
    }
}

/// Writes rows into the entity stores. Records, once written, are never
/// mutated; the matching engine only reads them.
pub struct Ingestor {
    companies: Arc<dyn DocumentCollection>,
    people: Arc<dyn DocumentCollection>,
}

impl Ingestor {
    pub fn new(companies: Arc<dyn DocumentCollection>, people: Arc<dyn DocumentCollection>) -> Self {
        Self { companies, people }
    }

    /// Import a batch. Rows owned by a user stay private to that user and are
    /// tagged `user-upload`; owner-less rows are globally visible `vault`
    /// data. Companies are deduplicated per (name, owner).
    pub async fn import_rows(
        &self,
        rows: &[ImportRow],
        owner: Option<&str>,
        country_default: Option<&str>,
    ) -> Result<ImportSummary, StoreError> {
        let origin = if owner.is_some() { "user-upload" } else { "vault" };
        let mut summary = ImportSummary::default();

        for (index, row) in rows.iter().enumerate() {
            let full_name =
                format!("{} {}", row.first_name.trim(), row.last_name.trim()).trim().to_string();
            let email = row.email.trim();
            let company_name = row.company.trim();

            let reason = if full_name.is_empty() {
                Some(SkipReason::MissingName)
            } else if email.is_empty() {
                Some(SkipReason::MissingEmail)
            } else if company_name.is_empty() {
                Some(SkipReason::MissingCompany)
            } else {
                None
            };
            if let Some(reason) = reason {
                summary.skipped.push(SkippedRow { row: index, reason });
                continue;
            }

            // An explicit batch default overrides per-row country columns.
            let country = country_default.or(row.country.as_deref()).map(str::to_string);

            let company_id = self
                .find_or_create_company(row, company_name, owner, country.as_deref(), origin, &mut summary)
                .await?;

            let now = Utc::now();
            let person = Person {
                person_id: uuid::Uuid::new_v4().to_string(),
                full_name,
                linkedin_url: row.linkedin_url.clone(),
                emails: vec![EmailInfo {
                    value: email.to_string(),
                    status: "active".to_string(),
                    fetched: false,
                    fetched_at: None,
                    expires_at: None,
                }],
                phones: vec![],
                employment: vec![Employment {
                    company_id,
                    title: row.title.clone().unwrap_or_default(),
                    from_date: None,
                    to_date: None,
                    expired: false,
                }],
                seniority: None,
                department: None,
                country,
                user_id: owner.map(str::to_string),
                created_at: now,
                updated_at: now,
            };

            self.people.insert(to_document(&person)?).await?;
            summary.people_added += 1;
        }

        tracing::info!(
            companies_added = summary.companies_added,
            people_added = summary.people_added,
            skipped = summary.skipped.len(),
            origin,
            "Import batch finished"
        );

        Ok(summary)
    }

    /// Existing company id for (name, owner), or a freshly inserted record's.
    async fn find_or_create_company(
        &self,
        row: &ImportRow,
        name: &str,
        owner: Option<&str>,
        country: Option<&str>,
        origin: &str,
        summary: &mut ImportSummary,
    ) -> Result<String, StoreError> {
        let owner_value = match owner {
            Some(id) => Value::String(id.to_string()),
            None => Value::Null,
        };
        let existing = self
            .companies
            .find(
                &Condition::And(vec![
                    Condition::Eq { field: "name", value: Value::String(name.to_string()) },
                    Condition::Eq { field: OWNER_FIELD, value: owner_value },
                ]),
                1,
            )
            .await?;

        if let Some(found) = existing.first() {
            if let Some(Value::String(id)) = found.get("company_id") {
                return Ok(id.clone());
            }
        }

        let now = Utc::now();
        let company = Company {
            company_id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            domain: None,
            industry: row.industry.clone(),
            size: row.employee_count.map(|n| size_bucket(n).to_string()),
            location: country.map(str::to_string),
            website: row.website.clone(),
            fetched_from: vec![origin.to_string()],
            user_id: owner.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        let id = company.company_id.clone();
        self.companies.insert(to_document(&company)?).await?;
        summary.companies_added += 1;
        Ok(id)
    }
}

fn to_document<T: Serialize>(record: &T) -> Result<Document, StoreError> {
    let value = serde_json::to_value(record)?;
    Ok(serde_json::from_value(value)?)
}

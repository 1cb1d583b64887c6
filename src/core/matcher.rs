use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

use crate::core::fields::{
    first_email, first_linkedin, first_text, first_title, first_value, full_name, id_text,
    COMPANY_ID_FIELDS, COMPANY_INDUSTRY_FIELDS, COMPANY_LOCATION_FIELDS, COMPANY_NAME_FIELDS,
    COMPANY_SIZE_FIELDS, COMPANY_SIZE_RANGE_FIELDS, PERSON_COMPANY_ID_FIELDS,
    PERSON_COMPANY_NAME_FIELDS, PERSON_TITLE_FIELDS,
};
use crate::core::filters::{size_bounds, text_matcher};
use crate::core::query::{Condition, Document, TextMatch};
use crate::core::scope::owner_scope;
use crate::models::{CompanySummary, IcpFilters, PersonSummary, SearchResults};
use crate::services::{DocumentCollection, StoreError};

/// Geography value whose historical vault import carried no country tagging:
/// rows from that dataset have no location/country field at all, so a request
/// for it also matches records lacking those fields entirely.
pub const UNTAGGED_COUNTRY: &str = "india";

/// Errors surfaced by a search call. Zero matches is not one of them.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Store query failed: {0}")]
    Store(#[from] StoreError),
}

/// Two-stage search orchestrator.
///
/// # Pipeline
/// 1. Company match: industry/geography/size clauses over aliased fields,
///    conjoined with the caller's visibility scope, with a single-retry
///    geography relaxation for the untagged-country sentinel.
/// 2. Linkage derivation: collected company names (or the topical filter that
///    drove the search) plus identifier values.
/// 3. People match: roles clause plus the derived company linkage, same scope.
pub struct SearchEngine {
    companies: Arc<dyn DocumentCollection>,
    people: Arc<dyn DocumentCollection>,
}

impl SearchEngine {
    pub fn new(companies: Arc<dyn DocumentCollection>, people: Arc<dyn DocumentCollection>) -> Self {
        Self { companies, people }
    }

    /// Run one search. Both store queries are sequential (the people stage
    /// depends on the company stage); the engine holds no state of its own.
    pub async fn search(
        &self,
        filters: &IcpFilters,
        owner: Option<&str>,
        limit: usize,
    ) -> Result<SearchResults, SearchError> {
        let industry = filters.industry.as_ref().and_then(text_matcher);
        let geography = filters.geography.as_ref().and_then(text_matcher);
        let untagged_country = geography
            .as_ref()
            .is_some_and(|m| m.requests(UNTAGGED_COUNTRY));

        // ---------- Stage 1: companies ----------
        let industry_clause = industry.as_ref().map(|m| alias_contains(COMPANY_INDUSTRY_FIELDS, m));
        let geography_clause = geography.as_ref().map(|m| {
            let mut parts: Vec<Condition> = COMPANY_LOCATION_FIELDS
                .iter()
                .copied()
                .map(|field| Condition::Contains { field, matcher: m.clone() })
                .collect();
            if untagged_country {
                // Rows from that import carry none of the location aliases.
                parts.push(Condition::And(
                    COMPANY_LOCATION_FIELDS
                        .iter()
                        .copied()
                        .map(|field| Condition::Missing { field })
                        .collect(),
                ));
            }
            Condition::Or(parts)
        });
        let size_clause = filters.company_size.as_ref().and_then(size_bounds).map(|bounds| {
            Condition::Or(
                COMPANY_SIZE_RANGE_FIELDS
                    .iter()
                    .copied()
                    .map(|field| Condition::Range { field, bounds })
                    .collect(),
            )
        });

        let scope = owner_scope(owner);

        let strict = conjoin(&[&industry_clause, &geography_clause, &size_clause], &scope);
        tracing::debug!(query = ?strict, "company query");
        let mut matched_companies = self.companies.find(&strict, limit).await?;

        // Single-retry widening, only for the untagged-country sentinel: drop
        // every location clause, keep industry/size and the visibility scope.
        if matched_companies.is_empty() && untagged_country {
            let relaxed = conjoin(&[&industry_clause, &size_clause], &scope);
            tracing::debug!(query = ?relaxed, "company query (relaxed untagged-country)");
            matched_companies = self.companies.find(&relaxed, limit).await?;
        }

        // ---------- Stage 2: company linkage ----------
        let mut company_names = Vec::new();
        let mut company_ids = Vec::new();
        for company in &matched_companies {
            if let Some(name) = first_text(company, COMPANY_NAME_FIELDS) {
                company_names.push(name);
            }
            for field in COMPANY_ID_FIELDS.iter().copied() {
                if let Some(value) = company.get(field) {
                    if !value.is_null() {
                        company_ids.push(id_text(value));
                    }
                }
            }
        }

        // With no company names to pivot on, reuse the topical signal that
        // drove the company search rather than returning nobody.
        let company_matcher = if company_names.is_empty() {
            industry.or(geography)
        } else {
            TextMatch::new(company_names)
        };

        // ---------- Stage 3: people ----------
        let roles = filters.roles.as_ref().and_then(text_matcher);
        let mut people_clauses = Vec::new();
        if let Some(m) = &roles {
            people_clauses.push(alias_contains(PERSON_TITLE_FIELDS, m));
        }

        let mut linkage = Vec::new();
        if let Some(m) = &company_matcher {
            linkage.extend(
                PERSON_COMPANY_NAME_FIELDS
                    .iter()
                    .copied()
                    .map(|field| Condition::Contains { field, matcher: m.clone() }),
            );
        }
        if !company_ids.is_empty() {
            linkage.extend(
                PERSON_COMPANY_ID_FIELDS
                    .iter()
                    .copied()
                    .map(|field| Condition::InSet { field, values: company_ids.clone() }),
            );
        }
        if !linkage.is_empty() {
            people_clauses.push(Condition::Or(linkage));
        }
        people_clauses.push(scope);

        let people_query = Condition::And(people_clauses);
        tracing::debug!(query = ?people_query, "people query");
        let matched_people = self.people.find(&people_query, limit).await?;

        self.log_diagnostics(matched_companies.len(), matched_people.len()).await;

        Ok(SearchResults {
            companies: matched_companies.iter().map(shape_company).collect(),
            people: matched_people.iter().map(shape_person).collect(),
        })
    }

    /// Store-level diagnostics, debug level only. Failures here are swallowed;
    /// diagnostics never affect the search outcome.
    async fn log_diagnostics(&self, companies_found: usize, people_found: usize) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let total_companies = self.companies.count().await.unwrap_or_default();
        let total_people = self.people.count().await.unwrap_or_default();
        tracing::debug!(
            total_companies,
            total_people,
            companies_found,
            people_found,
            "search diagnostics"
        );
        for field in COMPANY_INDUSTRY_FIELDS.iter().chain(COMPANY_LOCATION_FIELDS).copied() {
            let mut sample = self.companies.distinct(field).await.unwrap_or_default();
            sample.truncate(5);
            tracing::debug!(field, ?sample, "distinct company values");
        }
    }
}

fn alias_contains(fields: &[&'static str], matcher: &TextMatch) -> Condition {
    Condition::Or(
        fields
            .iter()
            .copied()
            .map(|field| Condition::Contains { field, matcher: matcher.clone() })
            .collect(),
    )
}

fn conjoin(clauses: &[&Option<Condition>], scope: &Condition) -> Condition {
    let mut parts: Vec<Condition> = clauses.iter().filter_map(|c| (*c).clone()).collect();
    parts.push(scope.clone());
    Condition::And(parts)
}

fn shape_company(doc: &Document) -> CompanySummary {
    CompanySummary {
        name: first_text(doc, COMPANY_NAME_FIELDS),
        industry: first_text(doc, COMPANY_INDUSTRY_FIELDS),
        size: first_value(doc, COMPANY_SIZE_FIELDS).cloned(),
        location: first_text(doc, COMPANY_LOCATION_FIELDS),
    }
}

fn shape_person(doc: &Document) -> PersonSummary {
    PersonSummary {
        full_name: full_name(doc),
        designation: first_title(doc).unwrap_or_default(),
        email: first_email(doc).unwrap_or_default(),
        linkedin: first_linkedin(doc).unwrap_or_default(),
        employment: employment_raw(doc),
    }
}

fn employment_raw(doc: &Document) -> Value {
    match doc.get("employment") {
        Some(v @ Value::Array(items)) if !items.is_empty() => v.clone(),
        Some(v @ Value::Object(map)) if !map.is_empty() => v.clone(),
        _ => json!({}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanySizeFilter, FilterScalar, FilterValue, SizeRange};
    use crate::services::MemoryCollection;
    use serde_json::json;

    fn collection(docs: Vec<Value>) -> Arc<dyn DocumentCollection> {
        Arc::new(MemoryCollection::with_docs(
            docs.into_iter().map(|v| v.as_object().unwrap().clone()).collect(),
        ))
    }

    fn engine(companies: Vec<Value>, people: Vec<Value>) -> SearchEngine {
        SearchEngine::new(collection(companies), collection(people))
    }

    fn text(value: &str) -> Option<FilterValue> {
        Some(FilterValue::One(FilterScalar::Text(value.to_string())))
    }

    #[tokio::test]
    async fn test_industry_matches_both_field_casings() {
        let engine = engine(
            vec![
                json!({"name": "A", "industry": "Plastics"}),
                json!({"name": "B", "Industry": "Plastics Manufacturing"}),
                json!({"name": "C", "industry": "Textiles"}),
            ],
            vec![],
        );
        let filters = IcpFilters { industry: text("plastics"), ..Default::default() };

        let results = engine.search(&filters, None, 20).await.unwrap();
        let names: Vec<_> = results.companies.iter().map(|c| c.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_untagged_country_widens_geography() {
        let engine = engine(
            vec![
                json!({"name": "Tagged", "country": "India"}),
                json!({"name": "Untagged"}),
                json!({"name": "Elsewhere", "country": "Germany"}),
            ],
            vec![],
        );
        let filters = IcpFilters { geography: text(" India "), ..Default::default() };

        let results = engine.search(&filters, None, 20).await.unwrap();
        let names: Vec<_> = results.companies.iter().map(|c| c.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Tagged", "Untagged"]);
    }

    #[tokio::test]
    async fn test_relaxation_single_retry() {
        // Strict pass matches nothing ("india" appears in no location field),
        // relaxed pass keeps industry and drops geography.
        let engine = engine(
            vec![json!({"name": "Acme", "industry": "Plastics", "country": "Germany"})],
            vec![],
        );
        let filters = IcpFilters {
            industry: text("plastics"),
            geography: text("india"),
            ..Default::default()
        };

        let results = engine.search(&filters, None, 20).await.unwrap();
        assert_eq!(results.companies.len(), 1);
        assert_eq!(results.companies[0].name.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn test_no_relaxation_without_sentinel() {
        let engine = engine(
            vec![json!({"name": "Acme", "industry": "Plastics", "country": "Germany"})],
            vec![],
        );
        let filters = IcpFilters {
            industry: text("plastics"),
            geography: text("france"),
            ..Default::default()
        };

        let results = engine.search(&filters, None, 20).await.unwrap();
        assert!(results.companies.is_empty());
    }

    #[tokio::test]
    async fn test_people_linked_by_company_name_and_id() {
        let engine = engine(
            vec![json!({"name": "Plastics Inc", "company_id": "c1", "industry": "Plastics"})],
            vec![
                json!({
                    "full_name": "Named Link",
                    "Company": "Plastics Inc",
                }),
                json!({
                    "full_name": "Id Link",
                    "employment": [{"company_id": "c1", "title": "Engineer"}],
                }),
                json!({
                    "full_name": "Unrelated",
                    "Company": "Textiles Ltd",
                }),
            ],
        );
        let filters = IcpFilters { industry: text("plastics"), ..Default::default() };

        let results = engine.search(&filters, None, 20).await.unwrap();
        let names: Vec<_> = results.people.iter().map(|p| p.full_name.clone()).collect();
        assert_eq!(names, vec!["Named Link", "Id Link"]);
    }

    #[tokio::test]
    async fn test_people_fallback_to_industry_signal() {
        // No company matched at all: people are still found through the same
        // topical signal, here a legacy company-name column mentioning it.
        let engine = engine(
            vec![],
            vec![json!({"full_name": "Topical", "company": "Plastics Processing GmbH"})],
        );
        let filters = IcpFilters { industry: text("plastics"), ..Default::default() };

        let results = engine.search(&filters, None, 20).await.unwrap();
        assert!(results.companies.is_empty());
        assert_eq!(results.people.len(), 1);
        assert_eq!(results.people[0].full_name, "Topical");
    }

    #[tokio::test]
    async fn test_size_range_against_both_count_fields() {
        let engine = engine(
            vec![
                json!({"name": "InRange", "employee_count": 120}),
                json!({"name": "LegacyInRange", "# Employees": 60}),
                json!({"name": "TooSmall", "employee_count": 10}),
                json!({"name": "BucketOnly", "size": "51-200"}),
            ],
            vec![],
        );
        let filters = IcpFilters {
            company_size: Some(CompanySizeFilter::Range(SizeRange {
                min: Some(50.0),
                max: Some(200.0),
                ..Default::default()
            })),
            ..Default::default()
        };

        let results = engine.search(&filters, None, 20).await.unwrap();
        let names: Vec<_> = results.companies.iter().map(|c| c.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["InRange", "LegacyInRange"]);
    }

    #[tokio::test]
    async fn test_empty_filters_return_visible_records() {
        let engine = engine(
            vec![
                json!({"name": "Global"}),
                json!({"name": "Private", "user_id": "u1"}),
            ],
            vec![],
        );

        let results = engine.search(&IcpFilters::default(), None, 20).await.unwrap();
        let names: Vec<_> = results.companies.iter().map(|c| c.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Global"]);
    }

    #[tokio::test]
    async fn test_output_shaping_defaults() {
        let engine = engine(
            vec![json!({"Company": "Legacy Co", "Industry": "Steel", "# Employees": 75})],
            vec![json!({
                "First Name": "Ravi",
                "Last Name": "Iyer",
                "Company": "Legacy Co",
            })],
        );
        let filters = IcpFilters { industry: text("steel"), ..Default::default() };

        let results = engine.search(&filters, None, 20).await.unwrap();
        let company = &results.companies[0];
        assert_eq!(company.name.as_deref(), Some("Legacy Co"));
        assert_eq!(company.size, Some(json!(75)));

        let person = &results.people[0];
        assert_eq!(person.full_name, "Ravi Iyer");
        assert_eq!(person.designation, "");
        assert_eq!(person.email, "");
        assert_eq!(person.linkedin, "");
        assert_eq!(person.employment, json!({}));
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CompanySizeFilter, FilterValue, IcpFilters};
use crate::services::ImportRow;

/// Request to run an ICP search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    pub industry: Option<FilterValue>,
    #[serde(default)]
    pub geography: Option<FilterValue>,
    #[serde(default)]
    pub roles: Option<FilterValue>,
    #[serde(default)]
    pub company_size: Option<CompanySizeFilter>,
    /// Owner scope; supplied by the upstream auth layer. Absent means only
    /// globally-visible records are searched.
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    #[validate(range(min = 1, max = 500))]
    #[serde(default)]
    pub limit: Option<u16>,
}

impl SearchRequest {
    pub fn filters(&self) -> IcpFilters {
        IcpFilters {
            industry: self.industry.clone(),
            geography: self.geography.clone(),
            roles: self.roles.clone(),
            company_size: self.company_size.clone(),
        }
    }
}

/// Request to run a search and persist its snapshot as a prospect list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveProspectsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "conversationId")]
    pub conversation_id: String,
    #[serde(default)]
    pub industry: Option<FilterValue>,
    #[serde(default)]
    pub geography: Option<FilterValue>,
    #[serde(default)]
    pub roles: Option<FilterValue>,
    #[serde(default)]
    pub company_size: Option<CompanySizeFilter>,
    #[validate(range(min = 1, max = 500))]
    #[serde(default)]
    pub limit: Option<u16>,
}

impl SaveProspectsRequest {
    pub fn filters(&self) -> IcpFilters {
        IcpFilters {
            industry: self.industry.clone(),
            geography: self.geography.clone(),
            roles: self.roles.clone(),
            company_size: self.company_size.clone(),
        }
    }
}

/// Request to import a batch of pre-parsed rows
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImportRequest {
    /// Present for user uploads (rows stay private to this owner), absent for
    /// global vault imports.
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    #[serde(default, alias = "countryDefault")]
    pub country_default: Option<String>,
    #[validate(length(min = 1))]
    pub rows: Vec<ImportRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_minimal_body() {
        let req: SearchRequest = serde_json::from_str(r#"{"industry": "plastics"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.user_id.is_none());
        assert!(req.limit.is_none());

        let filters = req.filters();
        assert!(filters.industry.is_some());
        assert!(filters.geography.is_none());
    }

    #[test]
    fn test_search_request_rejects_zero_limit() {
        let req: SearchRequest = serde_json::from_str(r#"{"limit": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}

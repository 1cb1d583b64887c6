// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Company, CompanySizeFilter, EmailInfo, Employment, FilterScalar, FilterValue, IcpFilters,
    Person, PhoneInfo, SizeRange,
};
pub use requests::{ImportRequest, SaveProspectsRequest, SearchRequest};
pub use responses::{
    CompanySummary, ErrorResponse, HealthResponse, PersonSummary, SearchResponse, SearchResults,
};

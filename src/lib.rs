//! ICP Search - filter-driven prospect search service
//!
//! This library provides the matching engine behind the ICP assistant: a
//! two-stage search that matches companies against loosely structured ICP
//! filters, then finds the people linked to them, under multi-tenant
//! visibility rules and with a documented single-retry relaxation.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{owner_scope, Condition, Document, SearchEngine, SearchError, TextMatch};
pub use models::{CompanySizeFilter, FilterValue, IcpFilters, SearchResults, SizeRange};
pub use services::{DocumentCollection, Ingestor, MemoryCollection, StoreError};

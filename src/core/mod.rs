// Core search engine exports
pub mod fields;
pub mod filters;
pub mod matcher;
pub mod query;
pub mod scope;

pub use filters::{size_bounds, text_matcher};
pub use matcher::{SearchEngine, SearchError, UNTAGGED_COUNTRY};
pub use query::{Condition, Document, SizeBounds, TextMatch};
pub use scope::owner_scope;

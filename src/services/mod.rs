// Service exports
pub mod ingest;
pub mod postgres;
pub mod store;

pub use ingest::{ImportRow, ImportSummary, Ingestor, SkipReason, SkippedRow};
pub use postgres::{PgCollection, PostgresClient, ProspectList, ProspectStore};
pub use store::{DocumentCollection, MemoryCollection, StoreError};

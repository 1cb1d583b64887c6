use async_trait::async_trait;
use serde_json::Value;
use std::sync::RwLock;
use thiserror::Error;

use crate::core::query::{values_at, Condition, Document};

/// Errors that can occur when talking to an entity store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A queryable collection of schemaless records.
///
/// The matching engine only ever reads through this interface; handles are
/// opened once at process start and injected. Ordering of `find` results is
/// store-native and not part of the contract.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Records matching `condition`, at most `limit` of them.
    async fn find(&self, condition: &Condition, limit: usize) -> Result<Vec<Document>, StoreError>;

    /// Distinct non-null values at `field`. Diagnostics only.
    async fn distinct(&self, field: &str) -> Result<Vec<Value>, StoreError>;

    /// Total record count. Diagnostics only.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Append a record.
    async fn insert(&self, doc: Document) -> Result<(), StoreError>;
}

/// In-memory collection: insertion-ordered, predicate evaluated per record.
///
/// Backs tests and benches; the production deployment uses the PostgreSQL
/// collections, which evaluate the same predicates the same way.
#[derive(Default)]
pub struct MemoryCollection {
    docs: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_docs(docs: Vec<Document>) -> Self {
        Self { docs: RwLock::new(docs) }
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn find(&self, condition: &Condition, limit: usize) -> Result<Vec<Document>, StoreError> {
        let docs = self.docs.read().expect("collection lock poisoned");
        Ok(docs
            .iter()
            .filter(|doc| condition.matches(doc))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn distinct(&self, field: &str) -> Result<Vec<Value>, StoreError> {
        let docs = self.docs.read().expect("collection lock poisoned");
        let mut seen = Vec::new();
        for doc in docs.iter() {
            for value in values_at(doc, field) {
                if !value.is_null() && !seen.contains(value) {
                    seen.push(value.clone());
                }
            }
        }
        Ok(seen)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let docs = self.docs.read().expect("collection lock poisoned");
        Ok(docs.len() as u64)
    }

    async fn insert(&self, doc: Document) -> Result<(), StoreError> {
        let mut docs = self.docs.write().expect("collection lock poisoned");
        docs.push(doc);
        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::core::query::{values_at, Condition, Document};
use crate::models::{IcpFilters, SearchResults};
use crate::services::store::{DocumentCollection, StoreError};

/// PostgreSQL connection bootstrap.
///
/// One pool is opened at process start and shared by every collection and the
/// prospect store; the engine itself never opens connections.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect and run pending migrations.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(url, max_connections.unwrap_or(10), min_connections.unwrap_or(1)).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// A document collection backed by the given table.
    pub fn collection(&self, table: &'static str) -> PgCollection {
        PgCollection { pool: self.pool.clone(), table }
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Document collection over a `(id UUID, doc JSONB)` table.
///
/// Predicates are evaluated in-process over the scanned rows, so `limit`
/// bounds the result set, not the scan; indexing the JSONB column is a
/// deployment concern.
pub struct PgCollection {
    pool: PgPool,
    table: &'static str,
}

#[async_trait]
impl DocumentCollection for PgCollection {
    async fn find(&self, condition: &Condition, limit: usize) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(&format!("SELECT doc FROM {} ORDER BY id", self.table))
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::new();
        for row in rows {
            let value: Value = row.try_get("doc")?;
            if let Value::Object(doc) = value {
                if condition.matches(&doc) {
                    out.push(doc);
                    if out.len() == limit {
                        break;
                    }
                }
            }
        }
        Ok(out)
    }

    async fn distinct(&self, field: &str) -> Result<Vec<Value>, StoreError> {
        let rows = sqlx::query(&format!("SELECT doc FROM {}", self.table))
            .fetch_all(&self.pool)
            .await?;

        let mut seen = Vec::new();
        for row in rows {
            let value: Value = row.try_get("doc")?;
            if let Value::Object(doc) = value {
                for v in values_at(&doc, field) {
                    if !v.is_null() && !seen.contains(v) {
                        seen.push(v.clone());
                    }
                }
            }
        }
        Ok(seen)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS total FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total as u64)
    }

    async fn insert(&self, doc: Document) -> Result<(), StoreError> {
        sqlx::query(&format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table))
            .bind(Uuid::new_v4())
            .bind(Value::Object(doc))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Persisted snapshot of one search: the filters that produced it and the
/// engine's output, verbatim, tied to the originating conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectList {
    pub prospect_list_id: Uuid,
    pub user_id: String,
    pub conversation_id: String,
    pub filters: Value,
    pub results: Value,
    pub created_at: DateTime<Utc>,
}

/// Store for prospect lists. Stores the engine output as-is; it never
/// re-runs or re-shapes a search.
pub struct ProspectStore {
    pool: PgPool,
}

impl ProspectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn save(
        &self,
        user_id: &str,
        conversation_id: &str,
        filters: &IcpFilters,
        results: &SearchResults,
    ) -> Result<ProspectList, StoreError> {
        let list = ProspectList {
            prospect_list_id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            conversation_id: conversation_id.to_string(),
            filters: serde_json::to_value(filters)?,
            results: serde_json::to_value(results)?,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO prospect_lists
                (prospect_list_id, user_id, conversation_id, filters, results, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(list.prospect_list_id)
        .bind(&list.user_id)
        .bind(&list.conversation_id)
        .bind(&list.filters)
        .bind(&list.results)
        .bind(list.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            prospect_list_id = %list.prospect_list_id,
            user_id,
            conversation_id,
            "Saved prospect list"
        );

        Ok(list)
    }

    /// Fetch one list, owner-scoped. A malformed id is just "not found".
    pub async fn get(
        &self,
        prospect_list_id: &str,
        user_id: &str,
    ) -> Result<Option<ProspectList>, StoreError> {
        let Ok(id) = Uuid::parse_str(prospect_list_id) else {
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            SELECT prospect_list_id, user_id, conversation_id, filters, results, created_at
            FROM prospect_lists
            WHERE prospect_list_id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_list).transpose()
    }

    /// All of a user's lists, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<ProspectList>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT prospect_list_id, user_id, conversation_id, filters, results, created_at
            FROM prospect_lists
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_list).collect()
    }
}

fn row_to_list(row: PgRow) -> Result<ProspectList, StoreError> {
    Ok(ProspectList {
        prospect_list_id: row.try_get("prospect_list_id")?,
        user_id: row.try_get("user_id")?,
        conversation_id: row.try_get("conversation_id")?,
        filters: row.try_get("filters")?,
        results: row.try_get("results")?,
        created_at: row.try_get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prospect_list_serializes_verbatim() {
        let list = ProspectList {
            prospect_list_id: Uuid::nil(),
            user_id: "u1".to_string(),
            conversation_id: "conv1".to_string(),
            filters: serde_json::json!({"industry": "plastics"}),
            results: serde_json::json!({"companies": [], "people": []}),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["filters"]["industry"], "plastics");
        assert_eq!(json["results"]["companies"], serde_json::json!([]));
    }
}

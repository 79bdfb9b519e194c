//! PostgreSQL-backed [`DocumentStore`] over a single JSONB table.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use taskboard_core::kind::KIND_FIELD;

use super::{DocumentStore, Filter};
use crate::error::StoreError;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Stores every document as a row of the `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The `_type` tag of a document, mirrored into the `kind` column.
fn kind_of(doc: &Value) -> Option<&str> {
    doc.get(KIND_FIELD).and_then(Value::as_str)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, Json<Value>>("SELECT body FROM documents WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(body.map(|Json(v)| v))
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Value>, StoreError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, (String, Json<Value>)>(
            "SELECT id, body FROM documents WHERE id = ANY($1)",
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await?;

        let by_key: HashMap<String, Value> =
            rows.into_iter().map(|(id, Json(body))| (id, body)).collect();
        Ok(keys.iter().filter_map(|k| by_key.get(k).cloned()).collect())
    }

    async fn insert(&self, key: &str, doc: &Value) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO documents (id, kind, body) VALUES ($1, $2, $3)")
            .bind(key)
            .bind(kind_of(doc))
            .bind(Json(doc))
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(StoreError::Conflict(db_err.message().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(&self, key: &str, doc: &Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (id, kind, body) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                kind = EXCLUDED.kind,
                body = EXCLUDED.body,
                updated_at = NOW()",
        )
        .bind(key)
        .bind(kind_of(doc))
        .bind(Json(doc))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let mut bind_idx = 1u32;
        let mut binds = Vec::new();
        let condition = filter.to_sql(&mut bind_idx, &mut binds);
        let query = format!("SELECT body FROM documents WHERE {condition} ORDER BY seq");

        let mut q = sqlx::query_scalar::<_, Json<Value>>(&query);
        for value in &binds {
            q = q.bind(value);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(v)| v).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

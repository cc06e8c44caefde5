//! Postgres + pgvector backed vector index.
//!
//! Reads the tables written by langchain-postgres ingestion:
//! `langchain_pg_collection` (one row per collection) and
//! `langchain_pg_embedding` (one row per chunk, with `document`, `cmetadata`
//! and the `embedding` vector). Ranking is pgvector's cosine distance.

use crate::types::Document;
use crate::vector_index::VectorIndex;
use pdfsearch_core::{AppError, AppResult};
use serde_json::{Map, Value};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

const SEARCH_SQL: &str = "SELECT e.document, e.cmetadata, (e.embedding <=> $1::vector) AS distance \
     FROM langchain_pg_embedding e \
     JOIN langchain_pg_collection c ON e.collection_id = c.uuid \
     WHERE c.name = $2 \
     ORDER BY distance ASC \
     LIMIT $3";

const COLLECTION_EXISTS_SQL: &str =
    "SELECT EXISTS (SELECT 1 FROM langchain_pg_collection WHERE name = $1)";

/// pgvector index scoped to one collection.
pub struct PgVectorIndex {
    pool: PgPool,
    collection: String,
}

impl PgVectorIndex {
    /// Create an index handle without opening a connection.
    ///
    /// Only URL syntax is checked here; connection problems surface on the
    /// first search so a down database fails a question, not startup.
    pub fn connect_lazy(database_url: &str, collection: impl Into<String>) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(database_url)
            .map_err(|e| AppError::Config(format!("Invalid vector store URL: {}", e)))?;

        Ok(Self::with_pool(pool, collection))
    }

    /// Wrap an existing pool.
    pub fn with_pool(pool: PgPool, collection: impl Into<String>) -> Self {
        Self {
            pool,
            collection: collection.into(),
        }
    }

    /// Name of the collection this index searches.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Whether the collection has been created by ingestion.
    pub async fn collection_exists(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(COLLECTION_EXISTS_SQL)
            .bind(&self.collection)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Store(format!("Failed to look up collection: {}", e)))
    }

    fn row_to_document(row: &PgRow) -> AppResult<Document> {
        let content: Option<String> = row
            .try_get("document")
            .map_err(|e| AppError::Store(format!("Invalid document column: {}", e)))?;
        let metadata: Option<Value> = row
            .try_get("cmetadata")
            .map_err(|e| AppError::Store(format!("Invalid cmetadata column: {}", e)))?;
        let distance: Option<f64> = row
            .try_get("distance")
            .map_err(|e| AppError::Store(format!("Invalid distance column: {}", e)))?;

        let mut document =
            Document::new(content.unwrap_or_default()).with_metadata(metadata_map(metadata));
        if let Some(distance) = distance {
            document = document.with_distance(distance as f32);
        }

        Ok(document)
    }
}

#[async_trait::async_trait]
impl VectorIndex for PgVectorIndex {
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<Document>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        tracing::debug!(
            "Searching collection '{}' (k={}, dim={})",
            self.collection,
            top_k,
            query_embedding.len()
        );

        let literal = vector_literal(query_embedding)?;

        let rows = sqlx::query(SEARCH_SQL)
            .bind(literal)
            .bind(&self.collection)
            .bind(top_k as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Store(format!("Similarity search failed: {}", e)))?;

        rows.iter().map(Self::row_to_document).collect()
    }
}

/// Format a vector as a pgvector text literal: `[0.1,0.2,0.3]`.
///
/// pgvector rejects NaN and infinite components, so they are refused here
/// with an embedding error instead of an opaque SQL one.
pub fn vector_literal(values: &[f32]) -> AppResult<String> {
    let mut literal = String::with_capacity(values.len() * 12 + 2);
    literal.push('[');
    for (i, value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(AppError::Embedding(format!(
                "Query embedding has a non-finite value ({}) at position {}",
                value, i
            )));
        }
        if i > 0 {
            literal.push(',');
        }
        literal.push_str(&value.to_string());
    }
    literal.push(']');
    Ok(literal)
}

/// Metadata column as a key/value map.
///
/// Non-object JSON is kept under a `value` key rather than dropped.
fn metadata_map(metadata: Option<Value>) -> Map<String, Value> {
    match metadata {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

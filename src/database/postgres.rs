use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

use super::filter::Filter;
use super::store::{document_id, DatabaseError, Document, DocumentStore};

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        seq BIGSERIAL PRIMARY KEY,
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        body JSONB NOT NULL,
        UNIQUE (collection, id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS documents_body_idx ON documents USING GIN (body jsonb_path_ops)",
    "CREATE UNIQUE INDEX IF NOT EXISTS documents_users_email_idx ON documents ((body->>'email')) WHERE collection = 'users'",
];

/// Postgres-backed document store: one JSONB row per document
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        let store = Self::from_pool(pool);
        store.ensure_schema().await?;
        info!("Document store ready (postgres, {} max connections)", config.max_connections);
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn map_write_error(collection: &str, err: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some("23505") {
            return DatabaseError::Duplicate {
                collection: collection.to_string(),
                constraint: db.constraint().unwrap_or("unique constraint").to_string(),
            };
        }
    }
    DatabaseError::Sqlx(err)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DatabaseError> {
        let rows = sqlx::query_scalar::<_, Json<Document>>(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY seq",
        )
        .bind(collection)
        .bind(Json(filter.to_json()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(document)| document).collect())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError> {
        let id = document_id(&document)?.to_string();
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Json(&document))
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;
        Ok(())
    }

    async fn update_one(&self, collection: &str, filter: &Filter, fields: Document) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET body = body || $3
            WHERE seq = (
                SELECT seq FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
            )
            "#,
        )
        .bind(collection)
        .bind(Json(filter.to_json()))
        .bind(Json(&fields))
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(collection, e))?;

        Ok(result.rows_affected())
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE seq = (
                SELECT seq FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
            )
            "#,
        )
        .bind(collection)
        .bind(Json(filter.to_json()))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

use super::filter::Filter;

/// A stored document: a JSON object keyed by field name
pub type Document = Map<String, Value>;

/// Errors raised by document stores and repositories
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate value in {collection} violates {constraint}")]
    Duplicate { collection: String, constraint: String },

    #[error("Document has no string 'id' field")]
    MissingId,

    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error("{operation} timed out after {limit:?}")]
    Timeout { operation: &'static str, limit: Duration },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Minimal document-store contract: filtered find, insert, single-document
/// update and delete. Every call is atomic for the one document it touches.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of `collection` matching `filter`, in stored order
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DatabaseError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, DatabaseError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError>;

    /// Merge `fields` into the first matching document. Returns the matched count (0 or 1).
    async fn update_one(&self, collection: &str, filter: &Filter, fields: Document) -> Result<u64, DatabaseError>;

    /// Remove the first matching document. Returns the removed count (0 or 1).
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Read the mandatory string identifier of a document
pub(crate) fn document_id(document: &Document) -> Result<&str, DatabaseError> {
    document
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(DatabaseError::MissingId)
}

use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::database::filter::Filter;
use crate::database::models::Entity;
use crate::database::store::{DatabaseError, Document, DocumentStore};

/// Per-call time limits for store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub read_write: Duration,
    pub delete: Duration,
}

impl Timeouts {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            read_write: config.read_write_timeout(),
            delete: config.delete_timeout(),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read_write: Duration::from_secs(100),
            delete: Duration::from_secs(5),
        }
    }
}

/// Typed access to one collection of the document store
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    timeouts: Timeouts,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            timeouts: self.timeouts,
            _phantom: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>, timeouts: Timeouts) -> Self {
        Self {
            store,
            timeouts,
            _phantom: PhantomData,
        }
    }

    pub async fn select_any(&self, filter: Filter) -> Result<Vec<T>, DatabaseError> {
        let documents = self
            .bounded("find", self.timeouts.read_write, self.store.find(T::COLLECTION, &filter))
            .await?;
        documents.into_iter().map(from_document).collect()
    }

    pub async fn select_one(&self, filter: Filter) -> Result<Option<T>, DatabaseError> {
        self.bounded("find_one", self.timeouts.read_write, self.store.find_one(T::COLLECTION, &filter))
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn select_404(&self, filter: Filter) -> Result<T, DatabaseError> {
        self.select_one(filter)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} not found", T::LABEL)))
    }

    pub async fn select_id(&self, id: &str) -> Result<Option<T>, DatabaseError> {
        self.select_one(Filter::by_id(id)).await
    }

    pub async fn insert(&self, entity: &T) -> Result<(), DatabaseError> {
        let document = to_document(entity)?;
        self.bounded("insert", self.timeouts.read_write, self.store.insert(T::COLLECTION, document))
            .await
    }

    /// Merge `fields` into the document with identifier `id`. Returns the matched count.
    pub async fn update_by_id(&self, id: &str, fields: Document) -> Result<u64, DatabaseError> {
        let filter = Filter::by_id(id);
        self.bounded("update", self.timeouts.read_write, self.store.update_one(T::COLLECTION, &filter, fields))
            .await
    }

    /// Remove the document with identifier `id`. Returns the removed count.
    pub async fn delete_by_id(&self, id: &str) -> Result<u64, DatabaseError> {
        let filter = Filter::by_id(id);
        self.bounded("delete", self.timeouts.delete, self.store.delete_one(T::COLLECTION, &filter))
            .await
    }

    async fn bounded<R>(
        &self,
        operation: &'static str,
        limit: Duration,
        call: impl Future<Output = Result<R, DatabaseError>>,
    ) -> Result<R, DatabaseError> {
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("{} on '{}' exceeded {:?}", operation, T::COLLECTION, limit);
                Err(DatabaseError::Timeout { operation, limit })
            }
        }
    }
}

pub fn to_document<T: serde::Serialize>(value: &T) -> Result<Document, DatabaseError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(DatabaseError::NotAnObject),
    }
}

fn from_document<T: Entity>(document: Document) -> Result<T, DatabaseError> {
    serde_json::from_value(Value::Object(document)).map_err(|e| {
        tracing::error!("Malformed document in '{}': {}", T::COLLECTION, e);
        DatabaseError::Serialization(e)
    })
}

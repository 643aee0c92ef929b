use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::filter::Filter;
use super::store::{document_id, DatabaseError, Document, DocumentStore};

/// In-process document store. Collections keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    unique: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the unique constraints the application relies on
    pub fn for_application() -> Self {
        Self::new().with_unique("users", "email")
    }

    /// Reject inserts that repeat `field`'s value within `collection`
    pub fn with_unique(mut self, collection: impl Into<String>, field: impl Into<String>) -> Self {
        self.unique.push((collection.into(), field.into()));
        self
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Number of documents across all collections
    pub async fn total(&self) -> usize {
        self.collections.read().await.values().map(Vec::len).sum()
    }

    fn check_unique(&self, collection: &str, existing: &[Document], document: &Document) -> Result<(), DatabaseError> {
        for (unique_collection, field) in &self.unique {
            if unique_collection != collection {
                continue;
            }
            let Some(value) = document.get(field) else { continue };
            if existing.iter().any(|other| other.get(field) == Some(value)) {
                return Err(DatabaseError::Duplicate {
                    collection: collection.to_string(),
                    constraint: format!("unique {}", field),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError> {
        let id = document_id(&document)?.to_string();
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        if documents.iter().any(|other| other.get("id").and_then(|v| v.as_str()) == Some(id.as_str())) {
            return Err(DatabaseError::Duplicate {
                collection: collection.to_string(),
                constraint: "unique id".to_string(),
            });
        }
        self.check_unique(collection, documents, &document)?;

        documents.push(document);
        Ok(())
    }

    async fn update_one(&self, collection: &str, filter: &Filter, fields: Document) -> Result<u64, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match documents.iter_mut().find(|document| filter.matches(document)) {
            Some(document) => {
                document.extend(fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match documents.iter().position(|document| filter.matches(document)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

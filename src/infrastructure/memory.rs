//! 内存文档存储

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::database::{Collection, DocumentStore, StorageError, StoredDocument};

/// 进程内的 [`DocumentStore`] 实现，语义与 Postgres 实现一致
pub struct MemoryDocumentStore {
    name: String,
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }
}

/// 顶层字段相等即匹配
fn matches(fields: &Map<String, Value>, filter: &Map<String, Value>) -> bool {
    filter
        .iter()
        .all(|(key, expected)| fields.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Map<String, Value>,
    ) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(StoredDocument {
            id: id.clone(),
            fields: document,
        });
        Ok(id)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Map<String, Value>,
        limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let limit = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
        Ok(documents
            .iter()
            .filter(|doc| matches(&doc.fields, filter))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(collection, _)| collection.name().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

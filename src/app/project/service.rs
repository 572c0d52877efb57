//! 项目业务服务

use serde_json::{Map, Value};

use super::model::Project;
use crate::core::response::serialize_document;
use crate::infrastructure::{Collection, DatabaseManager, StorageError};

#[derive(Clone)]
pub struct ProjectService {
    db: DatabaseManager,
}

impl ProjectService {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub async fn create_project(&self, project: &Project) -> Result<String, StorageError> {
        self.db.create_document(project).await
    }

    /// 返回的顺序不固定
    pub async fn list_projects(&self, limit: Option<u64>) -> Result<Vec<Value>, StorageError> {
        let documents = self
            .db
            .get_documents(Collection::Project, &Map::new(), limit)
            .await?;
        Ok(documents.into_iter().map(serialize_document).collect())
    }
}

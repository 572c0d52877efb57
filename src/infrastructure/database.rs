//! 数据库基础设施
//!
//! 文档存储的通用门面：按集合名插入单个文档、按过滤条件查询多个文档。
//! 具体引擎通过 [`DocumentStore`] trait 注入。

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};
use tracing::{error, info};

/// 集合：实体类型到存储命名空间的显式映射
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    User,
    Product,
    Project,
    Message,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::User,
        Collection::Product,
        Collection::Project,
        Collection::Message,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::User => "user",
            Collection::Product => "product",
            Collection::Project => "project",
            Collection::Message => "message",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 可持久化的记录，绑定其所属集合
pub trait Document: Serialize {
    const COLLECTION: Collection;
}

/// 已存储的文档：数据库生成的标识 + 字段
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Map<String, Value>,
}

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.")]
    Unavailable,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("document for collection '{0}' is not a JSON object")]
    NotAnObject(Collection),
}

/// 文档存储引擎
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 插入一个文档，返回新生成的标识
    async fn insert_one(
        &self,
        collection: Collection,
        document: Map<String, Value>,
    ) -> Result<String, StorageError>;

    /// 查询匹配 `filter` 的文档（空过滤器匹配全部）；`limit` 为 `None` 时不限数量。
    /// 不保证返回顺序。
    async fn find(
        &self,
        collection: Collection,
        filter: &Map<String, Value>,
        limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, StorageError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError>;

    /// 数据库名称
    fn name(&self) -> &str;
}

/// 进程级共享的数据库句柄，只读地注入到每个请求
#[derive(Clone, Default)]
pub struct DatabaseManager {
    store: Option<Arc<dyn DocumentStore>>,
}

impl DatabaseManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    /// 未配置数据库时使用，所有存储操作都会返回 [`StorageError::Unavailable`]
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.store.as_ref()
    }

    fn require_store(&self) -> Result<&Arc<dyn DocumentStore>, StorageError> {
        self.store.as_ref().ok_or(StorageError::Unavailable)
    }

    /// 序列化并插入记录，未设置的可选字段不会写入
    pub async fn create_document<T: Document>(&self, record: &T) -> Result<String, StorageError> {
        let store = self.require_store()?;

        let mut fields = match serde_json::to_value(record)? {
            Value::Object(fields) => fields,
            _ => return Err(StorageError::NotAnObject(T::COLLECTION)),
        };
        fields.retain(|_, value| !value.is_null());

        match store.insert_one(T::COLLECTION, fields).await {
            Ok(id) => {
                info!(collection = %T::COLLECTION, id = %id, "Document created");
                Ok(id)
            }
            Err(e) => {
                error!(collection = %T::COLLECTION, error = %e, "Failed to create document");
                Err(e)
            }
        }
    }

    pub async fn get_documents(
        &self,
        collection: Collection,
        filter: &Map<String, Value>,
        limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let store = self.require_store()?;

        store.find(collection, filter, limit).await.map_err(|e| {
            error!(collection = %collection, error = %e, "Failed to query documents");
            e
        })
    }
}

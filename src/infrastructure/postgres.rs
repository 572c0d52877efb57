//! Postgres 文档存储
//!
//! 所有集合共用一张 `documents` 表，文档体以 JSONB 保存。

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{
    postgres::{PgConnectOptions, PgPool, PgPoolOptions},
    types::Json,
    Row,
};
use std::{str::FromStr, time::Duration};
use tokio::sync::OnceCell;
use tracing::info;
use uuid::Uuid;

use super::database::{Collection, DocumentStore, StorageError, StoredDocument};

pub struct PgDocumentStore {
    pool: PgPool,
    name: String,
    schema: OnceCell<()>,
}

impl PgDocumentStore {
    /// 创建连接池（惰性连接），`database_name` 覆盖 URL 中的数据库名
    pub fn connect_lazy(database_url: &str, database_name: &str) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(database_url)?.database(database_name);

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(8))
            .connect_lazy_with(options);

        Ok(Self {
            pool,
            name: database_name.to_string(),
            schema: OnceCell::new(),
        })
    }

    /// 确保文档表存在；成功后不再重复执行
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        self.schema
            .get_or_try_init(|| self.create_schema())
            .await
            .map(|_| ())
    }

    async fn create_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                collection TEXT NOT NULL,
                body JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)")
            .execute(&self.pool)
            .await?;

        info!(database = %self.name, "Document table ready");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Map<String, Value>,
    ) -> Result<String, StorageError> {
        self.ensure_schema().await?;

        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO documents (collection, body) VALUES ($1, $2) RETURNING id",
        )
        .bind(collection.name())
        .bind(Json(document))
        .fetch_one(&self.pool)
        .await?;

        Ok(id.to_string())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Map<String, Value>,
        limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        self.ensure_schema().await?;

        // LIMIT NULL 表示不限制
        let limit = limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX));

        let rows = sqlx::query(
            "SELECT id, body FROM documents WHERE collection = $1 AND body @> $2 LIMIT $3",
        )
        .bind(collection.name())
        .bind(Json(filter.clone()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<StoredDocument, StorageError> {
                let id: Uuid = row.try_get("id")?;
                let Json(fields): Json<Map<String, Value>> = row.try_get("body")?;
                Ok(StoredDocument {
                    id: id.to_string(),
                    fields,
                })
            })
            .collect()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        self.ensure_schema().await?;

        let names =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

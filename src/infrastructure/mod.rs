//! 基础设施层：配置、日志、文档存储

pub mod config;
pub mod database;
pub mod logger;
pub mod memory;
pub mod postgres;

pub use config::{AppConfig, ConfigError};
pub use database::{
    Collection, DatabaseManager, Document, DocumentStore, StorageError, StoredDocument,
};
pub use logger::Logger;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

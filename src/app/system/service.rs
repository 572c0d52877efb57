//! 系统诊断服务
//!
//! 诊断过程不会失败：所有错误都以状态字符串的形式写入报告。

use serde::Serialize;
use tracing::{debug, warn};

use crate::infrastructure::{AppConfig, DatabaseManager};

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

#[derive(Clone)]
pub struct SystemService {
    db: DatabaseManager,
    database_url_set: bool,
    database_name_set: bool,
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn presence(set: bool) -> String {
    let status = if set { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

impl SystemService {
    pub fn new(db: DatabaseManager, config: &AppConfig) -> Self {
        Self {
            db,
            database_url_set: config.database_url_set(),
            database_name_set: config.database_name_set(),
        }
    }

    pub async fn diagnostics(&self) -> DiagnosticsReport {
        let (database, connection_status, collections) = match self.db.store() {
            Some(store) => {
                debug!(database = store.name(), "Running database diagnostics");
                match store.list_collection_names().await {
                    Ok(mut names) => {
                        names.truncate(MAX_COLLECTIONS);
                        ("✅ Connected & Working".to_string(), "Connected", names)
                    }
                    Err(e) => {
                        warn!(error = %e, "Diagnostics could not list collections");
                        let database = format!(
                            "⚠️  Connected but Error: {}",
                            truncate(&e.to_string(), MAX_ERROR_CHARS)
                        );
                        (database, "Connected", Vec::new())
                    }
                }
            }
            None => (
                "⚠️  Available but not initialized".to_string(),
                "Not Connected",
                Vec::new(),
            ),
        };

        DiagnosticsReport {
            backend: "✅ Running".to_string(),
            database,
            database_url: presence(self.database_url_set),
            database_name: presence(self.database_name_set),
            connection_status: connection_status.to_string(),
            collections,
        }
    }
}

//! 留言业务服务

use super::model::Message;
use crate::infrastructure::{DatabaseManager, StorageError};

#[derive(Clone)]
pub struct MessageService {
    db: DatabaseManager,
}

impl MessageService {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub async fn submit_message(&self, message: &Message) -> Result<String, StorageError> {
        self.db.create_document(message).await
    }
}

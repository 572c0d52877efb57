//! 核心响应处理模块

use serde::Serialize;
use serde_json::Value;

use crate::infrastructure::StoredDocument;

/// 静态消息响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// 创建成功响应
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub status: &'static str,
}

/// 列表响应
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<Value>,
    pub count: usize,
}

impl ListResponse {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// 将存储文档转换为对外格式：内部标识以字符串字段 `id` 输出
pub fn serialize_document(document: StoredDocument) -> Value {
    let StoredDocument { id, mut fields } = document;
    fields.insert("id".to_string(), Value::String(id));
    Value::Object(fields)
}

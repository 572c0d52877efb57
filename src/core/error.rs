//! 核心错误处理模块
//!
//! 错误类型到 HTTP 状态码的转换表：
//! - [`CoreError::Validation`] → 422，列出所有不合法的字段
//! - [`CoreError::Storage`] → 500，携带原始错误文本

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::infrastructure::StorageError;

/// 单个字段的校验问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// 请求数据未通过结构校验
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request validation failed ({} issue(s))", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                loc: loc.iter().map(|s| s.to_string()).collect(),
                msg: msg.into(),
                kind: kind.into(),
            }],
        }
    }

    /// 展开 `validator` 的字段错误，按字段名排序
    pub fn from_errors(location: &str, errors: &validator::ValidationErrors) -> Self {
        let mut issues: Vec<FieldIssue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = field.to_string();
                field_errors.iter().map(move |error| FieldIssue {
                    loc: vec![location.to_string(), field.clone()],
                    msg: error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", error.code)),
                    kind: error.code.to_string(),
                })
            })
            .collect();

        issues.sort_by(|a, b| a.loc.cmp(&b.loc));
        Self { issues }
    }

    /// 出错字段名（不含位置前缀）
    pub fn fields(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter_map(|issue| issue.loc.last().map(String::as_str))
            .collect()
    }
}

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse<T: Serialize> {
    pub detail: T,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            CoreError::Validation(e) => {
                warn!(fields = ?e.fields(), "Request validation failed");
                (status, Json(ErrorResponse { detail: e.issues })).into_response()
            }
            CoreError::Storage(e) => {
                error!(error = %e, "Storage operation failed");
                (
                    status,
                    Json(ErrorResponse {
                        detail: e.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

//! 系统处理器：存活检查、静态消息、数据库诊断

use axum::{extract::State, response::Json};

use super::service::DiagnosticsReport;
use crate::app::AppState;
use crate::core::response::MessageResponse;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from FastAPI Backend!",
    })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}

/// 总是返回 200
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(state.system_service.diagnostics().await)
}

//! 留言处理器

use axum::{extract::State, response::Json};

use super::model::Message;
use crate::app::AppState;
use crate::core::{error::CoreError, extract::ValidatedJson, response::CreatedResponse};

pub async fn create_message(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Message>,
) -> Result<Json<CreatedResponse>, CoreError> {
    let id = state.message_service.submit_message(&payload).await?;
    Ok(Json(CreatedResponse {
        id,
        status: "received",
    }))
}

//! 项目处理器

use axum::{extract::State, response::Json};

use super::model::{ListProjectsQuery, Project};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    extract::{ValidatedJson, ValidatedQuery},
    response::{CreatedResponse, ListResponse},
};

pub async fn list_projects(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListProjectsQuery>,
) -> Result<Json<ListResponse>, CoreError> {
    let items = state
        .project_service
        .list_projects(query.effective_limit())
        .await?;
    Ok(Json(ListResponse::new(items)))
}

pub async fn create_project(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Project>,
) -> Result<Json<CreatedResponse>, CoreError> {
    let id = state.project_service.create_project(&payload).await?;
    Ok(Json(CreatedResponse {
        id,
        status: "created",
    }))
}

//! 应用层：实体模型、业务服务、路由

pub mod message;
pub mod product;
pub mod project;
pub mod system;
pub mod user;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::core::middleware::{cors_layer, request_logging_middleware};
use crate::infrastructure::{AppConfig, DatabaseManager};
use message::MessageService;
use project::ProjectService;
use system::SystemService;

/// 每个请求共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub project_service: ProjectService,
    pub message_service: MessageService,
    pub system_service: SystemService,
}

impl AppState {
    pub fn new(db: DatabaseManager, config: &AppConfig) -> Self {
        Self {
            project_service: ProjectService::new(db.clone()),
            message_service: MessageService::new(db.clone()),
            system_service: SystemService::new(db, config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(system::handler::root))
        .route("/api/hello", get(system::handler::hello))
        .route(
            "/api/projects",
            get(project::handler::list_projects).post(project::handler::create_project),
        )
        .route("/api/messages", post(message::handler::create_message))
        .route("/test", get(system::handler::test_database))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

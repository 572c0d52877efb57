//! 核心中间件模块

use axum::{
    extract::{MatchedPath, Request},
    http::header,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

/// 日志中使用的路由模板，如 `/api/projects`；未匹配任何路由时退回原始路径
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned())
}

/// 请求日志中间件，按路由模板记录方法、状态码与耗时
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let route = route_label(&req);
    let method = req.method().to_string();
    let agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let started = Instant::now();
    let response = next.run(req).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    info!(
        %route,
        %method,
        status = response.status().as_u16(),
        latency_ms,
        %agent,
        "Request handled"
    );

    response
}

/// 跨域策略：允许任意来源、方法、请求头，并允许携带凭证。
/// 携带凭证时不能使用 `*`，因此回显请求中的值。
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

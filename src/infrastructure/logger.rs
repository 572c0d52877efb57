//! 日志基础设施

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "portfolio_backend=info,tower_http=info";

pub struct Logger;

impl Logger {
    /// 优先使用 `RUST_LOG`，否则使用默认过滤规则
    pub fn init() {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
            .with(tracing_subscriber::fmt::layer().with_target(false).compact())
            .init();
    }
}

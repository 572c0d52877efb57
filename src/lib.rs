//! # 作品集后端
//!
//! 为个人作品集网站提供 JSON API（项目列表、联系留言）：
//! - 应用层：实体模型校验、业务服务、路由
//! - 核心层：错误到 HTTP 状态码的转换、校验提取器、中间件
//! - 基础设施层：配置、日志、文档存储

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};

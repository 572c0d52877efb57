//! 核心层：错误处理、请求校验、中间件、响应结构

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod schema;

pub use error::{CoreError, FieldIssue, ValidationError};
pub use extract::{ValidatedJson, ValidatedQuery};
pub use schema::{FieldKind, FieldSpec, Schema};

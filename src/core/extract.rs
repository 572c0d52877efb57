//! 校验提取器
//!
//! JSON 语法错误、缺失字段、类型错误与约束校验失败都会转换为 [`ValidationError`]（422）。

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use super::error::{CoreError, ValidationError};
use super::schema::{parse_payload, Schema};

/// 经过校验的 JSON 请求体
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// 经过校验的查询参数
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body_error",
        };
        ValidationError::single(&["body"], rejection.body_text(), kind)
    }
}

impl From<QueryRejection> for ValidationError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::single(&["query"], rejection.body_text(), "type_error")
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Schema + DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(ValidationError::from)?;
        Ok(Self(parse_payload(body)?))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationError::from)?;
        value
            .validate()
            .map_err(|e| ValidationError::from_errors("query", &e))?;
        Ok(Self(value))
    }
}

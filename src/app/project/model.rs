//! 作品集项目数据模型

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::core::{FieldKind, FieldSpec, Schema};
use crate::infrastructure::{Collection, Document};

/// 未指定 `limit` 时返回的最大项目数
pub const DEFAULT_PROJECT_LIMIT: u64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Project {
    pub title: String,

    /// 项目简介
    pub description: String,

    #[serde(default)]
    pub tech_stack: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_http_url"))]
    pub repo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_http_url"))]
    pub demo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,
}

impl Document for Project {
    const COLLECTION: Collection = Collection::Project;
}

impl Schema for Project {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("description", FieldKind::String),
        FieldSpec::defaulted("tech_stack", FieldKind::StringList),
        FieldSpec::nullable("repo_url", FieldKind::String),
        FieldSpec::nullable("demo_url", FieldKind::String),
        FieldSpec::nullable("image_url", FieldKind::String),
    ];
}

/// 只接受带主机名的 http/https 链接
fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty()) =>
        {
            Ok(())
        }
        _ => {
            let mut error = ValidationError::new("url");
            error.message =
                Some("Input should be a valid URL, scheme must be http or https".into());
            Err(error)
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListProjectsQuery {
    #[validate(range(min = 0, message = "limit must be a non-negative integer"))]
    pub limit: Option<i64>,
}

impl ListProjectsQuery {
    /// `None` 表示不限制数量（`limit=0`）
    pub fn effective_limit(&self) -> Option<u64> {
        match self.limit {
            None => Some(DEFAULT_PROJECT_LIMIT),
            Some(0) => None,
            Some(n) => u64::try_from(n).ok(),
        }
    }
}

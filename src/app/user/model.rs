//! 用户数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{FieldKind, FieldSpec, Schema};
use crate::infrastructure::{Collection, Document};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    pub name: String,

    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,

    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120"))]
    pub age: Option<i32>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Document for User {
    const COLLECTION: Collection = Collection::User;
}

impl Schema for User {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("email", FieldKind::String),
        FieldSpec::required("address", FieldKind::String),
        FieldSpec::nullable("age", FieldKind::Integer),
        FieldSpec::defaulted("is_active", FieldKind::Bool),
    ];
}

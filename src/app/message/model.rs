//! 联系留言数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{FieldKind, FieldSpec, Schema};
use crate::infrastructure::{Collection, Document};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Message {
    #[validate(length(min = 2, message = "String should have at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,

    #[validate(length(min = 2, message = "String should have at least 2 characters"))]
    pub subject: String,

    #[validate(length(
        min = 5,
        max = 5000,
        message = "String should have between 5 and 5000 characters"
    ))]
    pub message: String,
}

impl Document for Message {
    const COLLECTION: Collection = Collection::Message;
}

impl Schema for Message {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("email", FieldKind::String),
        FieldSpec::required("subject", FieldKind::String),
        FieldSpec::required("message", FieldKind::String),
    ];
}

//! 产品数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{FieldKind, FieldSpec, Schema};
use crate::infrastructure::{Collection, Document};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 价格（美元）
    #[validate(range(min = 0.0, message = "Price must be greater than or equal to 0"))]
    pub price: f64,

    pub category: String,

    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Document for Product {
    const COLLECTION: Collection = Collection::Product;
}

impl Schema for Product {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::nullable("description", FieldKind::String),
        FieldSpec::required("price", FieldKind::Number),
        FieldSpec::required("category", FieldKind::String),
        FieldSpec::defaulted("in_stock", FieldKind::Bool),
    ];
}

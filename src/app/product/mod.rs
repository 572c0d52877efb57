//! 产品（示例集合）

pub mod model;

pub use model::Product;

pub mod handler;
pub mod model;
pub mod service;

pub use model::{ListProjectsQuery, Project};
pub use service::ProjectService;

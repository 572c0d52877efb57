pub mod handler;
pub mod service;

pub use service::{DiagnosticsReport, SystemService};

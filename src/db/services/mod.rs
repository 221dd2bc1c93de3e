//! High-level database API for the checklist service. Encapsulates all
//! SQL so handlers work with domain models without knowing the schema.
//!
//! One sub-module per domain area; everything is re-exported here so
//! callers use the flat `crate::db::services::` path.

pub mod catalog_service;
pub mod history_service;
pub mod session_service;
pub mod user_service;

pub use catalog_service::*;
pub use history_service::*;
pub use session_service::*;
pub use user_service::*;

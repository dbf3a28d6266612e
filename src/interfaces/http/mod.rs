//! HTTP REST API interfaces
//!
//! - `common`: error mapping and the validating JSON extractor
//! - `middleware`: JWT authentication and role guards
//! - `modules`: request handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, create_metrics_router, AppState};

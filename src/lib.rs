//! # PVZ Service
//!
//! Pickup points (PVZ), goods receptions and products.
//!
//! ## Architecture
//!
//! - **domain**: entities, enumerations and reception state transitions
//! - **application**: use cases, each run as one unit of work
//! - **infrastructure**: SeaORM persistence, transaction manager, crypto
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, pagination, validation helpers, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, Repositories, TxManager};

// Re-export API routers
pub use interfaces::http::{create_api_router, create_metrics_router, AppState};

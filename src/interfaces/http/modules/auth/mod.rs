//! Authentication module: dummy login, registration, login

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

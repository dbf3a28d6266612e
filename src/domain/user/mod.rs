//! User aggregate
//!
//! Contains the User entity and role enumeration.

pub mod model;

pub use model::{User, UserRole};

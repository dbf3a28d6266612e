//! Application layer: use cases over the domain and repositories

pub mod identity;
pub mod services;

pub use identity::{AuthResult, IdentityService};
pub use services::{ProductService, PvzService, ReceptionLookup, ReceptionService};

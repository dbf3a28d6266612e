//! Reception aggregate
//!
//! A reception is an intake session at a pickup point. It starts open and
//! is closed exactly once.

pub mod model;

pub use model::{Reception, ReceptionStatus, ReceptionWithProducts};

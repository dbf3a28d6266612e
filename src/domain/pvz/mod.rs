//! Pickup point aggregate

pub mod model;

pub use model::{City, PickupPoint, PickupPointWithReceptions};

//! Domain layer: entities, enumerations and state transitions. No I/O.

pub mod product;
pub mod pvz;
pub mod reception;
pub mod user;

pub use product::{Product, ProductType};
pub use pvz::{City, PickupPoint, PickupPointWithReceptions};
pub use reception::{Reception, ReceptionStatus, ReceptionWithProducts};
pub use user::{User, UserRole};

pub use crate::shared::{DomainError, DomainResult};

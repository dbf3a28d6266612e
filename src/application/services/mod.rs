//! Application services
//!
//! Every mutating call runs as one unit of work through `TxManager`;
//! read-only calls query the pool directly.

pub mod product;
pub mod pvz;
pub mod reception;

pub use product::ProductService;
pub use pvz::PvzService;
pub use reception::{ReceptionLookup, ReceptionService};

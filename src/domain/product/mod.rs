pub mod model;

pub use model::{Product, ProductType};

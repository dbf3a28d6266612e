//! Database entities module

pub mod product;
pub mod pvz;
pub mod reception;
pub mod user;

pub use product::Entity as Product;
pub use pvz::Entity as Pvz;
pub use reception::Entity as Reception;
pub use user::Entity as User;

//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories, generic over `ConnectionTrait` so the
//! same call works on the pool and inside a transaction.

pub mod product_repository;
pub mod pvz_repository;
pub mod reception_repository;
pub mod repository_provider;
pub mod user_repository;

pub use product_repository::ProductRepository;
pub use pvz_repository::PvzRepository;
pub use reception_repository::ReceptionRepository;
pub use repository_provider::Repositories;
pub use user_repository::UserRepository;

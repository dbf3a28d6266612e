//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250401_000001_create_pvz;
mod m20250401_000002_create_receptions;
mod m20250401_000003_create_products;
mod m20250401_000004_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250401_000001_create_pvz::Migration),
            Box::new(m20250401_000002_create_receptions::Migration),
            Box::new(m20250401_000003_create_products::Migration),
            Box::new(m20250401_000004_create_users::Migration),
        ]
    }
}

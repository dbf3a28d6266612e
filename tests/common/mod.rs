//! Shared fixtures: a fresh in-memory SQLite database per test, migrated
//! with the production migrator.

#![allow(dead_code)]

use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use pvz_service::application::{IdentityService, ProductService, PvzService, ReceptionService};
use pvz_service::domain::PickupPoint;
use pvz_service::infrastructure::crypto::jwt::JwtConfig;
use pvz_service::infrastructure::database::migrator::Migrator;
use pvz_service::{init_database, DatabaseConfig, TxManager};

pub async fn setup_db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::sqlite_in_memory())
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "pvz-service".to_string(),
    }
}

pub struct Services {
    pub tx: TxManager,
    pub pvz: PvzService,
    pub receptions: ReceptionService,
    pub products: ProductService,
    pub identity: IdentityService,
}

pub async fn setup() -> Services {
    let db = setup_db().await;
    let tx = TxManager::new(db).with_timeout(Some(Duration::from_secs(10)));
    Services {
        pvz: PvzService::new(tx.clone()),
        receptions: ReceptionService::new(tx.clone()),
        products: ProductService::new(tx.clone()),
        identity: IdentityService::new(tx.clone(), test_jwt_config()),
        tx,
    }
}

impl Services {
    pub async fn pvz_in(&self, city: &str) -> PickupPoint {
        self.pvz.create_pvz(city).await.expect("create pvz")
    }
}

mod common;

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use pvz_service::application::{ProductService, PvzService};
use pvz_service::domain::{DomainError, Product, ProductType};
use pvz_service::{Repositories, TxManager};

#[tokio::test]
async fn delete_is_last_in_first_out() {
    let s = common::setup().await;
    let pvz = s.pvz_in("Москва").await;
    let reception = s.receptions.create_reception(pvz.id).await.unwrap();

    let p1 = s.products.add_product("электроника", pvz.id).await.unwrap();
    let p2 = s.products.add_product("одежда", pvz.id).await.unwrap();
    let p3 = s.products.add_product("обувь", pvz.id).await.unwrap();

    assert_eq!(s.products.delete_last_product(pvz.id).await.unwrap().id, p3.id);
    assert_eq!(s.products.delete_last_product(pvz.id).await.unwrap().id, p2.id);

    let remaining = s.products.list_products(reception.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, p1.id);
    assert_eq!(remaining[0].product_type, ProductType::Electronics);
}

#[tokio::test]
async fn deleting_from_empty_reception_fails() {
    let s = common::setup().await;
    let pvz = s.pvz_in("Казань").await;
    let reception = s.receptions.create_reception(pvz.id).await.unwrap();

    let err = s.products.delete_last_product(pvz.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NoProductsToDelete { reception_id } if reception_id == reception.id));
}

#[tokio::test]
async fn closed_reception_cannot_be_modified() {
    let s = common::setup().await;
    let pvz = s.pvz_in("Москва").await;
    s.receptions.create_reception(pvz.id).await.unwrap();
    s.products.add_product("обувь", pvz.id).await.unwrap();
    s.receptions.close_last_reception(pvz.id).await.unwrap();

    let add = s.products.add_product("обувь", pvz.id).await.unwrap_err();
    let delete = s.products.delete_last_product(pvz.id).await.unwrap_err();

    assert!(matches!(add, DomainError::ReceptionCannotBeModified { .. }));
    assert!(matches!(delete, DomainError::ReceptionCannotBeModified { .. }));
}

#[tokio::test]
async fn products_need_an_open_reception() {
    let s = common::setup().await;
    let pvz = s.pvz_in("Санкт-Петербург").await;

    let err = s.products.add_product("одежда", pvz.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NoActiveReception { pvz_id } if pvz_id == pvz.id));
}

#[tokio::test]
async fn product_is_readable_by_id() {
    let s = common::setup().await;
    let pvz = s.pvz_in("Москва").await;
    s.receptions.create_reception(pvz.id).await.unwrap();
    let added = s.products.add_product("одежда", pvz.id).await.unwrap();

    assert_eq!(s.products.get_product(added.id).await.unwrap(), added);
    assert!(matches!(
        s.products.get_product(Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn invalid_input_never_reaches_storage() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let tx = TxManager::shared(Arc::clone(&db));
    let products = ProductService::new(tx.clone());
    let pvz = PvzService::new(tx);

    let err = products.add_product("мебель", Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidProductType(_)));
    let err = products.add_product("", Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::MissingField("type")));
    let err = pvz.create_pvz("Новосибирск").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidCity(_)));

    drop((products, pvz));
    let db = Arc::try_unwrap(db).ok().expect("services released the pool");
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn equal_timestamps_fall_back_to_id_order() {
    let s = common::setup().await;
    let repos = Repositories::default();
    let pvz = s.pvz_in("Москва").await;
    let reception = s.receptions.create_reception(pvz.id).await.unwrap();

    let stamp = Utc::now();
    let mut ids: Vec<Uuid> = (0..4).map(|_| Uuid::now_v7()).collect();
    ids.sort();
    // Stored out of id order so insertion order cannot decide the result.
    for &i in &[2usize, 0, 3, 1] {
        let product = Product {
            id: ids[i],
            date_time: stamp,
            product_type: ProductType::Clothes,
            reception_id: reception.id,
        };
        repos.products.insert(s.tx.connection(), &product).await.unwrap();
    }

    let mut deleted = Vec::new();
    for _ in 0..ids.len() {
        let last = repos
            .products
            .delete_last(s.tx.connection(), reception.id)
            .await
            .unwrap();
        assert_eq!(last.date_time, stamp);
        deleted.push(last.id);
    }

    ids.reverse();
    assert_eq!(deleted, ids);
    assert!(matches!(
        repos.products.delete_last(s.tx.connection(), reception.id).await,
        Err(DomainError::NoProductsToDelete { .. })
    ));
}

mod common;

use chrono::{Duration, Utc};
use pvz_service::domain::{City, DomainError};
use pvz_service::shared::PvzFilter;
use uuid::Uuid;

#[tokio::test]
async fn created_pvz_is_readable() {
    let s = common::setup().await;
    let created = s.pvz_in("Санкт-Петербург").await;

    let loaded = s.pvz.get_pvz(created.id).await.unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.city, City::SaintPetersburg);
}

#[tokio::test]
async fn unsupported_city_is_rejected() {
    let s = common::setup().await;
    assert!(matches!(
        s.pvz.create_pvz("Новосибирск").await,
        Err(DomainError::InvalidCity(_))
    ));
    assert!(matches!(
        s.pvz.create_pvz("").await,
        Err(DomainError::MissingField("city"))
    ));
    assert!(matches!(
        s.pvz.get_pvz(Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn total_counts_every_match_not_just_the_page() {
    let s = common::setup().await;
    for _ in 0..5 {
        s.pvz_in("Казань").await;
    }

    let first = s
        .pvz
        .list_pvz(&PvzFilter::new(None, None, Some(1), Some(2)))
        .await
        .unwrap();
    let last = s
        .pvz
        .list_pvz(&PvzFilter::new(None, None, Some(3), Some(2)))
        .await
        .unwrap();

    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.total, 5);
}

#[tokio::test]
async fn pages_do_not_overlap() {
    let s = common::setup().await;
    for _ in 0..4 {
        s.pvz_in("Москва").await;
    }

    let p1 = s
        .pvz
        .list_pvz(&PvzFilter::new(None, None, Some(1), Some(2)))
        .await
        .unwrap();
    let p2 = s
        .pvz
        .list_pvz(&PvzFilter::new(None, None, Some(2), Some(2)))
        .await
        .unwrap();

    for item in &p1.items {
        assert!(!p2.items.iter().any(|other| other.id == item.id));
    }
}

#[tokio::test]
async fn date_range_selects_points_with_receptions_in_range() {
    let s = common::setup().await;
    let busy = s.pvz_in("Москва").await;
    let idle = s.pvz_in("Казань").await;

    s.receptions.create_reception(busy.id).await.unwrap();
    s.products.add_product("электроника", busy.id).await.unwrap();

    let now = Utc::now();
    let filter = PvzFilter::new(
        Some(now - Duration::hours(1)),
        Some(now + Duration::hours(1)),
        None,
        None,
    );
    let page = s.pvz.list_pvz_with_receptions(&filter).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].pvz.id, busy.id);
    assert_eq!(page.items[0].receptions.len(), 1);
    assert_eq!(page.items[0].receptions[0].products.len(), 1);
    assert!(page.items.iter().all(|i| i.pvz.id != idle.id));

    let past = PvzFilter::new(
        Some(now - Duration::days(10)),
        Some(now - Duration::days(9)),
        None,
        None,
    );
    assert_eq!(s.pvz.list_pvz_with_receptions(&past).await.unwrap().total, 0);
}

#[tokio::test]
async fn listing_without_range_includes_points_without_receptions() {
    let s = common::setup().await;
    let busy = s.pvz_in("Москва").await;
    s.pvz_in("Казань").await;
    s.receptions.create_reception(busy.id).await.unwrap();

    let page = s
        .pvz
        .list_pvz_with_receptions(&PvzFilter::new(None, None, None, None))
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    let with_receptions: usize = page.items.iter().map(|i| i.receptions.len()).sum();
    assert_eq!(with_receptions, 1);
}

#[tokio::test]
async fn listing_reflects_creation_results_exactly() {
    let s = common::setup().await;
    let pvz = s.pvz_in("Санкт-Петербург").await;
    let all = PvzFilter::new(None, None, None, None);

    let page = s.pvz.list_pvz_with_receptions(&all).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].pvz, pvz);
    assert!(page.items[0].receptions.is_empty());

    let reception = s.receptions.create_reception(pvz.id).await.unwrap();
    let product = s.products.add_product("обувь", pvz.id).await.unwrap();

    let page = s.pvz.list_pvz_with_receptions(&all).await.unwrap();
    let listed = &page.items[0].receptions;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].reception, reception);
    assert_eq!(listed[0].products, vec![product]);
}

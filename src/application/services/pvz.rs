//! Pickup point catalog

use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    City, DomainResult, PickupPoint, PickupPointWithReceptions, Product, ReceptionWithProducts,
};
use crate::infrastructure::{Repositories, TxManager};
use crate::shared::{PaginatedResult, PvzFilter};

#[derive(Clone)]
pub struct PvzService {
    tx: TxManager,
    repos: Repositories,
}

impl PvzService {
    pub fn new(tx: TxManager) -> Self {
        Self {
            tx,
            repos: Repositories::default(),
        }
    }

    /// Registers a pickup point. The city is validated before any storage call.
    pub async fn create_pvz(&self, city: &str) -> DomainResult<PickupPoint> {
        let city = City::parse(city)?;
        let pvz = PickupPoint::new(city);
        let repo = self.repos.pvz;

        let created = self
            .tx
            .run_in_transaction(move |txn| Box::pin(async move { repo.insert(txn, &pvz).await }))
            .await?;

        metrics::counter!("pvz_created_total").increment(1);
        info!(pvz_id = %created.id, city = %created.city, "Pickup point created");
        Ok(created)
    }

    pub async fn get_pvz(&self, id: Uuid) -> DomainResult<PickupPoint> {
        self.repos.pvz.get(self.tx.connection(), id).await
    }

    /// One page of pickup points. `total` counts every match of the filter,
    /// not just the returned page.
    pub async fn list_pvz(&self, filter: &PvzFilter) -> DomainResult<PaginatedResult<PickupPoint>> {
        let (items, total) = self.repos.pvz.list(self.tx.connection(), filter).await?;
        Ok(PaginatedResult::new(items, total, filter.page, filter.limit))
    }

    /// Same page as `list_pvz`, with each point's receptions (restricted to
    /// the filter's date range) and their products. Receptions and products
    /// are loaded with one bulk query each.
    pub async fn list_pvz_with_receptions(
        &self,
        filter: &PvzFilter,
    ) -> DomainResult<PaginatedResult<PickupPointWithReceptions>> {
        let conn = self.tx.connection();
        let (points, total) = self.repos.pvz.list(conn, filter).await?;

        let pvz_ids: Vec<Uuid> = points.iter().map(|p| p.id).collect();
        let receptions = self
            .repos
            .receptions
            .list_by_pvz_ids(conn, &pvz_ids, filter)
            .await?;

        let reception_ids: Vec<Uuid> = receptions.iter().map(|r| r.id).collect();
        let products = self
            .repos
            .products
            .list_by_reception_ids(conn, &reception_ids)
            .await?;

        let mut products_by_reception: HashMap<Uuid, Vec<Product>> = HashMap::new();
        for product in products {
            products_by_reception
                .entry(product.reception_id)
                .or_default()
                .push(product);
        }

        let mut receptions_by_pvz: HashMap<Uuid, Vec<ReceptionWithProducts>> = HashMap::new();
        for reception in receptions {
            let products = products_by_reception
                .remove(&reception.id)
                .unwrap_or_default();
            receptions_by_pvz
                .entry(reception.pvz_id)
                .or_default()
                .push(ReceptionWithProducts {
                    reception,
                    products,
                });
        }

        let items = points
            .into_iter()
            .map(|pvz| PickupPointWithReceptions {
                receptions: receptions_by_pvz.remove(&pvz.id).unwrap_or_default(),
                pvz,
            })
            .collect();

        Ok(PaginatedResult::new(items, total, filter.page, filter.limit))
    }
}

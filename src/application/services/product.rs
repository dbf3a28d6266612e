//! Product registration
//!
//! Products are appended to and removed from the open reception only, and
//! removal is last-in-first-out.

use tracing::info;
use uuid::Uuid;

use super::reception::ReceptionLookup;
use crate::domain::{DomainError, DomainResult, Product, ProductType};
use crate::infrastructure::{Repositories, TxManager};

#[derive(Clone)]
pub struct ProductService {
    tx: TxManager,
    repos: Repositories,
}

impl ProductService {
    pub fn new(tx: TxManager) -> Self {
        Self {
            tx,
            repos: Repositories::default(),
        }
    }

    /// Adds a product to the open reception of `pvz_id`. An unknown type is
    /// rejected before any storage call.
    pub async fn add_product(&self, product_type: &str, pvz_id: Uuid) -> DomainResult<Product> {
        let product_type = match ProductType::parse(product_type) {
            Ok(t) => t,
            Err(e) => {
                info!(product_type, pvz_id = %pvz_id, "Rejected product type");
                return Err(e);
            }
        };
        let repos = self.repos;

        let product = self
            .tx
            .run_in_transaction(move |txn| {
                Box::pin(async move {
                    let reception = ReceptionLookup::resolve(&repos, txn, pvz_id)
                        .await?
                        .into_modifiable(pvz_id)?;

                    repos
                        .products
                        .insert(txn, &Product::new(product_type, reception.id))
                        .await
                })
            })
            .await?;

        metrics::counter!("products_added_total").increment(1);
        info!(
            product_id = %product.id,
            product_type = %product.product_type,
            reception_id = %product.reception_id,
            "Product added"
        );
        Ok(product)
    }

    /// Removes and returns the most recently added product of the open
    /// reception of `pvz_id`.
    pub async fn delete_last_product(&self, pvz_id: Uuid) -> DomainResult<Product> {
        let repos = self.repos;

        let removed = self
            .tx
            .run_in_transaction(move |txn| {
                Box::pin(async move {
                    let reception = ReceptionLookup::resolve(&repos, txn, pvz_id)
                        .await?
                        .into_modifiable(pvz_id)?;

                    repos.products.delete_last(txn, reception.id).await
                })
            })
            .await?;

        info!(
            product_id = %removed.id,
            reception_id = %removed.reception_id,
            "Last product deleted"
        );
        Ok(removed)
    }

    pub async fn get_product(&self, id: Uuid) -> DomainResult<Product> {
        self.repos
            .products
            .find_by_id(self.tx.connection(), id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", "id", id))
    }

    /// Products of a reception, oldest first
    pub async fn list_products(&self, reception_id: Uuid) -> DomainResult<Vec<Product>> {
        self.repos
            .products
            .list_by_reception(self.tx.connection(), reception_id)
            .await
    }
}

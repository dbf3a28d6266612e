//! SeaORM repository for products
//!
//! Products are ordered by `(date_time, id)`. Ids are UUIDv7, so two products
//! stamped with the same instant still have a fixed order.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use super::pvz_repository::corrupt_row;
use crate::domain::{Product, ProductType};
use crate::infrastructure::database::entities::product;
use crate::shared::{unique_violation, DomainError, DomainResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductRepository;

fn model_to_domain(m: product::Model) -> DomainResult<Product> {
    let product_type =
        ProductType::parse(&m.product_type).map_err(|e| corrupt_row("products", m.id, e))?;
    Ok(Product {
        id: m.id,
        date_time: m.date_time,
        product_type,
        reception_id: m.reception_id,
    })
}

fn models_to_domain(models: Vec<product::Model>) -> DomainResult<Vec<Product>> {
    models.into_iter().map(model_to_domain).collect()
}

impl ProductRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> DomainResult<Option<Product>> {
        product::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    pub async fn insert<C: ConnectionTrait>(&self, conn: &C, p: &Product) -> DomainResult<Product> {
        debug!(product_id = %p.id, reception_id = %p.reception_id, "Inserting product");

        let model = product::ActiveModel {
            id: Set(p.id),
            date_time: Set(p.date_time),
            product_type: Set(p.product_type.as_str().to_string()),
            reception_id: Set(p.reception_id),
        };
        match model.insert(conn).await {
            Ok(saved) => model_to_domain(saved),
            Err(e) => match unique_violation(&e) {
                Some(_) => Err(DomainError::Conflict(format!(
                    "Product with id {} already exists",
                    p.id
                ))),
                None => Err(e.into()),
            },
        }
    }

    /// Products of a reception, oldest first.
    pub async fn list_by_reception<C: ConnectionTrait>(
        &self,
        conn: &C,
        reception_id: Uuid,
    ) -> DomainResult<Vec<Product>> {
        let models = product::Entity::find()
            .filter(product::Column::ReceptionId.eq(reception_id))
            .order_by_asc(product::Column::DateTime)
            .order_by_asc(product::Column::Id)
            .all(conn)
            .await?;
        models_to_domain(models)
    }

    /// Products of several receptions in one query, oldest first.
    pub async fn list_by_reception_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        reception_ids: &[Uuid],
    ) -> DomainResult<Vec<Product>> {
        if reception_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = product::Entity::find()
            .filter(product::Column::ReceptionId.is_in(reception_ids.iter().copied()))
            .order_by_asc(product::Column::DateTime)
            .order_by_asc(product::Column::Id)
            .all(conn)
            .await?;
        models_to_domain(models)
    }

    pub async fn find_last_by_reception<C: ConnectionTrait>(
        &self,
        conn: &C,
        reception_id: Uuid,
    ) -> DomainResult<Option<Product>> {
        product::Entity::find()
            .filter(product::Column::ReceptionId.eq(reception_id))
            .order_by_desc(product::Column::DateTime)
            .order_by_desc(product::Column::Id)
            .one(conn)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    /// Removes the most recently created product of a reception and returns
    /// it. An empty reception is `NoProductsToDelete`.
    pub async fn delete_last<C: ConnectionTrait>(
        &self,
        conn: &C,
        reception_id: Uuid,
    ) -> DomainResult<Product> {
        let last = self
            .find_last_by_reception(conn, reception_id)
            .await?
            .ok_or(DomainError::NoProductsToDelete { reception_id })?;

        let result = product::Entity::delete_by_id(last.id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NoProductsToDelete { reception_id });
        }

        debug!(product_id = %last.id, reception_id = %reception_id, "Deleted last product");
        Ok(last)
    }
}

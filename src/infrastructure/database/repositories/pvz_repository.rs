//! SeaORM repository for pickup points

use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{City, PickupPoint};
use crate::infrastructure::database::entities::{pvz, reception};
use crate::shared::{unique_violation, DomainError, DomainResult, InfraError, PvzFilter};

#[derive(Debug, Clone, Copy, Default)]
pub struct PvzRepository;

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: pvz::Model) -> DomainResult<PickupPoint> {
    let city = City::parse(&m.city).map_err(|e| corrupt_row("pvz", m.id, e))?;
    Ok(PickupPoint {
        id: m.id,
        registration_date: m.registration_date,
        city,
    })
}

/// A stored row that no longer parses into the domain is a storage fault,
/// not a caller error.
pub(super) fn corrupt_row(table: &str, id: Uuid, e: DomainError) -> DomainError {
    InfraError::Database(DbErr::Type(format!("{} row {}: {}", table, id, e))).into()
}

/// Restricts a pickup point query to points with a reception inside the range.
fn apply_filter(select: Select<pvz::Entity>, filter: &PvzFilter) -> Select<pvz::Entity> {
    if !filter.has_date_range() {
        return select;
    }

    let mut receptions_in_range = Query::select();
    receptions_in_range
        .column(reception::Column::PvzId)
        .from(reception::Entity);
    if let Some(start) = filter.start_date {
        receptions_in_range.and_where(reception::Column::DateTime.gte(start));
    }
    if let Some(end) = filter.end_date {
        receptions_in_range.and_where(reception::Column::DateTime.lte(end));
    }

    select.filter(pvz::Column::Id.in_subquery(receptions_in_range))
}

// ── Queries ─────────────────────────────────────────────────────

impl PvzRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> DomainResult<Option<PickupPoint>> {
        pvz::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    /// Like `find_by_id` but a missing row is `NotFound`.
    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: Uuid) -> DomainResult<PickupPoint> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pickup point", "id", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        p: &PickupPoint,
    ) -> DomainResult<PickupPoint> {
        debug!(pvz_id = %p.id, city = %p.city, "Inserting pickup point");

        let model = pvz::ActiveModel {
            id: Set(p.id),
            registration_date: Set(p.registration_date),
            city: Set(p.city.as_str().to_string()),
        };
        match model.insert(conn).await {
            Ok(saved) => model_to_domain(saved),
            Err(e) => match unique_violation(&e) {
                Some(_) => Err(DomainError::Conflict(format!(
                    "Pickup point with id {} already exists",
                    p.id
                ))),
                None => Err(e.into()),
            },
        }
    }

    /// Returns one page of pickup points plus the number of rows matching
    /// the filter across all pages.
    pub async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &PvzFilter,
    ) -> DomainResult<(Vec<PickupPoint>, u64)> {
        let total = apply_filter(pvz::Entity::find(), filter).count(conn).await?;

        let models = apply_filter(pvz::Entity::find(), filter)
            .order_by_asc(pvz::Column::RegistrationDate)
            .order_by_asc(pvz::Column::Id)
            .offset(filter.offset())
            .limit(filter.limit)
            .all(conn)
            .await?;

        let items = models
            .into_iter()
            .map(model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;
        debug!(total, returned = items.len(), "Listed pickup points");
        Ok((items, total))
    }
}

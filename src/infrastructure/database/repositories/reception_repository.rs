//! SeaORM repository for receptions

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Reception, ReceptionStatus};
use crate::infrastructure::database::entities::reception;
use crate::shared::{
    is_open_reception_violation, unique_violation, DomainError, DomainResult, PvzFilter,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReceptionRepository;

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_db(s: ReceptionStatus) -> reception::ReceptionStatus {
    match s {
        ReceptionStatus::InProgress => reception::ReceptionStatus::InProgress,
        ReceptionStatus::Close => reception::ReceptionStatus::Close,
    }
}

fn status_from_db(s: reception::ReceptionStatus) -> ReceptionStatus {
    match s {
        reception::ReceptionStatus::InProgress => ReceptionStatus::InProgress,
        reception::ReceptionStatus::Close => ReceptionStatus::Close,
    }
}

fn model_to_domain(m: reception::Model) -> Reception {
    Reception {
        id: m.id,
        date_time: m.date_time,
        pvz_id: m.pvz_id,
        status: status_from_db(m.status),
    }
}

// ── Queries ─────────────────────────────────────────────────────

impl ReceptionRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> DomainResult<Option<Reception>> {
        let model = reception::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(model_to_domain))
    }

    /// Inserts a reception. A second open reception for the same pickup
    /// point trips the partial unique index and surfaces as
    /// `ActiveReceptionExists`.
    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        r: &Reception,
    ) -> DomainResult<Reception> {
        debug!(reception_id = %r.id, pvz_id = %r.pvz_id, "Inserting reception");

        let model = reception::ActiveModel {
            id: Set(r.id),
            date_time: Set(r.date_time),
            pvz_id: Set(r.pvz_id),
            status: Set(status_to_db(r.status)),
        };
        match model.insert(conn).await {
            Ok(saved) => Ok(model_to_domain(saved)),
            Err(e) => match unique_violation(&e) {
                Some(msg) if is_open_reception_violation(&msg) => {
                    Err(DomainError::ActiveReceptionExists { pvz_id: r.pvz_id })
                }
                Some(_) => Err(DomainError::Conflict(format!(
                    "Reception with id {} already exists",
                    r.id
                ))),
                None => Err(e.into()),
            },
        }
    }

    /// The open reception of a pickup point, if any.
    pub async fn find_open_by_pvz<C: ConnectionTrait>(
        &self,
        conn: &C,
        pvz_id: Uuid,
    ) -> DomainResult<Option<Reception>> {
        let model = reception::Entity::find()
            .filter(reception::Column::PvzId.eq(pvz_id))
            .filter(reception::Column::Status.eq(reception::ReceptionStatus::InProgress))
            .order_by_desc(reception::Column::DateTime)
            .order_by_desc(reception::Column::Id)
            .one(conn)
            .await?;
        Ok(model.map(model_to_domain))
    }

    /// Like `find_open_by_pvz`, but absence is `NoActiveReception`.
    pub async fn get_open_by_pvz<C: ConnectionTrait>(
        &self,
        conn: &C,
        pvz_id: Uuid,
    ) -> DomainResult<Reception> {
        self.find_open_by_pvz(conn, pvz_id)
            .await?
            .ok_or(DomainError::NoActiveReception { pvz_id })
    }

    /// Most recent reception of a pickup point regardless of status.
    pub async fn find_last_by_pvz<C: ConnectionTrait>(
        &self,
        conn: &C,
        pvz_id: Uuid,
    ) -> DomainResult<Option<Reception>> {
        let model = reception::Entity::find()
            .filter(reception::Column::PvzId.eq(pvz_id))
            .order_by_desc(reception::Column::DateTime)
            .order_by_desc(reception::Column::Id)
            .one(conn)
            .await?;
        Ok(model.map(model_to_domain))
    }

    /// Closes an open reception with a conditional update. When no row
    /// changes the reception was either closed concurrently
    /// (`AlreadyClosed`) or never existed (`NotFound`).
    pub async fn close<C: ConnectionTrait>(&self, conn: &C, id: Uuid) -> DomainResult<()> {
        let result = reception::Entity::update_many()
            .col_expr(
                reception::Column::Status,
                Expr::value(reception::ReceptionStatus::Close),
            )
            .filter(reception::Column::Id.eq(id))
            .filter(reception::Column::Status.eq(reception::ReceptionStatus::InProgress))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return match self.find_by_id(conn, id).await? {
                Some(_) => Err(DomainError::AlreadyClosed { reception_id: id }),
                None => Err(DomainError::not_found("Reception", "id", id)),
            };
        }

        debug!(reception_id = %id, "Reception closed");
        Ok(())
    }

    /// Receptions of the given pickup points inside the filter's date range,
    /// oldest first.
    pub async fn list_by_pvz_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        pvz_ids: &[Uuid],
        filter: &PvzFilter,
    ) -> DomainResult<Vec<Reception>> {
        if pvz_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut select = reception::Entity::find()
            .filter(reception::Column::PvzId.is_in(pvz_ids.iter().copied()));
        if let Some(start) = filter.start_date {
            select = select.filter(reception::Column::DateTime.gte(start));
        }
        if let Some(end) = filter.end_date {
            select = select.filter(reception::Column::DateTime.lte(end));
        }

        let models = select
            .order_by_asc(reception::Column::DateTime)
            .order_by_asc(reception::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

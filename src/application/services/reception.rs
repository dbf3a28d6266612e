//! Reception lifecycle
//!
//! A pickup point has at most one open reception. Receptions move from
//! `in_progress` to `close` once and never reopen.

use sea_orm::ConnectionTrait;
use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Reception, ReceptionWithProducts};
use crate::infrastructure::{Repositories, TxManager};

/// State of the reception a product or close request would act on
#[derive(Debug, Clone, PartialEq)]
pub enum ReceptionLookup {
    Open(Reception),
    /// No open reception; this is the most recent one and it is closed.
    Closed(Reception),
    /// The pickup point has never had a reception.
    Missing,
}

impl ReceptionLookup {
    /// Resolves the open reception of `pvz_id`, falling back to the latest
    /// reception so callers can tell "closed" apart from "never opened".
    pub async fn resolve<C: ConnectionTrait>(
        repos: &Repositories,
        conn: &C,
        pvz_id: Uuid,
    ) -> DomainResult<Self> {
        if let Some(open) = repos.receptions.find_open_by_pvz(conn, pvz_id).await? {
            return Ok(Self::Open(open));
        }
        Ok(match repos.receptions.find_last_by_pvz(conn, pvz_id).await? {
            Some(last) => Self::Closed(last),
            None => Self::Missing,
        })
    }

    /// The reception to modify, or the error for a closed or missing one.
    pub fn into_modifiable(self, pvz_id: Uuid) -> DomainResult<Reception> {
        match self {
            Self::Open(reception) => {
                reception.ensure_modifiable()?;
                Ok(reception)
            }
            Self::Closed(reception) => Err(DomainError::ReceptionCannotBeModified {
                reception_id: reception.id,
            }),
            Self::Missing => Err(DomainError::NoActiveReception { pvz_id }),
        }
    }
}

#[derive(Clone)]
pub struct ReceptionService {
    tx: TxManager,
    repos: Repositories,
}

impl ReceptionService {
    pub fn new(tx: TxManager) -> Self {
        Self {
            tx,
            repos: Repositories::default(),
        }
    }

    /// Opens a reception. Fails with `NotFound` for an unknown pickup point
    /// and `ActiveReceptionExists` when one is already open, including when
    /// a concurrent caller wins the race and the unique index rejects the
    /// insert.
    pub async fn create_reception(&self, pvz_id: Uuid) -> DomainResult<Reception> {
        let repos = self.repos;

        let created = self
            .tx
            .run_in_transaction(move |txn| {
                Box::pin(async move {
                    repos.pvz.get(txn, pvz_id).await?;

                    if repos.receptions.find_open_by_pvz(txn, pvz_id).await?.is_some() {
                        return Err(DomainError::ActiveReceptionExists { pvz_id });
                    }

                    repos.receptions.insert(txn, &Reception::open(pvz_id)).await
                })
            })
            .await?;

        metrics::counter!("receptions_created_total").increment(1);
        info!(reception_id = %created.id, pvz_id = %pvz_id, "Reception created");
        Ok(created)
    }

    /// Closes the open reception of a pickup point and returns it with its
    /// final product list.
    pub async fn close_last_reception(&self, pvz_id: Uuid) -> DomainResult<ReceptionWithProducts> {
        let repos = self.repos;

        let closed = self
            .tx
            .run_in_transaction(move |txn| {
                Box::pin(async move {
                    let open = match ReceptionLookup::resolve(&repos, txn, pvz_id).await? {
                        ReceptionLookup::Open(r) => r,
                        ReceptionLookup::Closed(r) => {
                            return Err(DomainError::AlreadyClosed { reception_id: r.id })
                        }
                        ReceptionLookup::Missing => {
                            return Err(DomainError::NoActiveReception { pvz_id })
                        }
                    };

                    // Zero rows updated means another caller closed it first.
                    repos.receptions.close(txn, open.id).await?;

                    let reception = repos
                        .receptions
                        .find_by_id(txn, open.id)
                        .await?
                        .ok_or_else(|| DomainError::not_found("Reception", "id", open.id))?;
                    let products = repos.products.list_by_reception(txn, reception.id).await?;
                    Ok(ReceptionWithProducts {
                        reception,
                        products,
                    })
                })
            })
            .await?;

        info!(
            reception_id = %closed.reception.id,
            pvz_id = %pvz_id,
            products = closed.products.len(),
            "Reception closed"
        );
        Ok(closed)
    }

    pub async fn get_reception(&self, id: Uuid) -> DomainResult<ReceptionWithProducts> {
        let conn = self.tx.connection();
        let reception = self
            .repos
            .receptions
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reception", "id", id))?;
        let products = self.repos.products.list_by_reception(conn, id).await?;
        Ok(ReceptionWithProducts {
            reception,
            products,
        })
    }

    pub async fn get_open_reception(&self, pvz_id: Uuid) -> DomainResult<Reception> {
        self.repos
            .receptions
            .get_open_by_pvz(self.tx.connection(), pvz_id)
            .await
    }

    pub async fn get_last_reception(&self, pvz_id: Uuid) -> DomainResult<Reception> {
        self.repos
            .receptions
            .find_last_by_pvz(self.tx.connection(), pvz_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reception", "pvz_id", pvz_id))
    }
}

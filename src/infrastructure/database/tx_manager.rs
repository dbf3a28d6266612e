//! Unit of work over a SeaORM transaction
//!
//! `run_in_transaction` begins a READ COMMITTED transaction, hands it to the
//! caller's closure and then:
//! - commits when the closure returns `Ok`
//! - rolls back and returns the closure's error unchanged on `Err`
//! - rolls back and resumes unwinding when the closure panics
//! - rolls back with `InfraError::Timeout` when the optional deadline passes
//!
//! Dropping the returned future drops the transaction, which SeaORM rolls back.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use sea_orm::{DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};
use tracing::{debug, error, warn};

use crate::shared::{DomainResult, InfraError};

#[derive(Clone)]
pub struct TxManager {
    db: Arc<DatabaseConnection>,
    timeout: Option<Duration>,
}

impl TxManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::shared(Arc::new(db))
    }

    /// Builds on a pool handle the caller keeps a reference to.
    pub fn shared(db: Arc<DatabaseConnection>) -> Self {
        Self { db, timeout: None }
    }

    /// Abort and roll back any unit of work still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ambient connection for reads that do not need a unit of work
    pub fn connection(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    pub fn shared_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.db)
    }

    pub async fn run_in_transaction<T, F>(&self, work: F) -> DomainResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, DomainResult<T>> + Send,
    {
        let started = Instant::now();
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), None)
            .await?;
        debug!("Transaction started");

        let outcome = {
            let scope = &txn;
            // The closure itself runs under the guard, not only its future.
            let guarded = AssertUnwindSafe(async move { work(scope).await }).catch_unwind();
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, guarded).await {
                    Ok(outcome) => outcome,
                    Err(_) => Ok(Err(InfraError::Timeout(limit).into())),
                },
                None => guarded.await,
            }
        };

        match outcome {
            Ok(Ok(value)) => {
                txn.commit().await.map_err(InfraError::Commit)?;
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Transaction committed"
                );
                Ok(value)
            }
            Ok(Err(err)) => {
                if err.is_storage() {
                    warn!(error = %err, "Unit of work failed");
                } else {
                    debug!(error = %err, "Unit of work rejected");
                }
                rollback(txn, started).await;
                Err(err)
            }
            Err(panic) => {
                error!("Panic inside transaction, rolling back");
                rollback(txn, started).await;
                std::panic::resume_unwind(panic)
            }
        }
    }
}

async fn rollback(txn: DatabaseTransaction, started: Instant) {
    match txn.rollback().await {
        Ok(()) => debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Transaction rolled back"
        ),
        Err(e) => error!("Rollback failed: {}", e),
    }
}

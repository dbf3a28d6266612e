//! Bundle of per-aggregate repositories
//!
//! Repositories hold no connection. Every method takes the execution
//! context explicitly, either the pool or an open transaction:
//!
//! ```ignore
//! let repos = Repositories::default();
//! let pvz = repos.pvz.get(&db, pvz_id).await?;
//! tx.run_in_transaction(move |txn| Box::pin(async move {
//!     repos.receptions.get_open_by_pvz(txn, pvz_id).await
//! })).await?;
//! ```

use super::{ProductRepository, PvzRepository, ReceptionRepository, UserRepository};

#[derive(Debug, Clone, Copy, Default)]
pub struct Repositories {
    pub pvz: PvzRepository,
    pub receptions: ReceptionRepository,
    pub products: ProductRepository,
    pub users: UserRepository,
}

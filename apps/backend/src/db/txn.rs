use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future returned by `with_txn` closures, borrowing the transaction.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'a>>;

/// A transaction injected into request extensions so that several requests
/// (or a test and the handlers it calls) share one unit of work.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Begin a transaction on `db` and wrap it for sharing.
    pub async fn open(db: &DatabaseConnection) -> Result<Self, AppError> {
        let txn = db.begin().await?;
        Ok(Self(Arc::new(txn)))
    }

    /// The SharedTxn stored in the request extensions, if any
    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Roll back the shared transaction. Fails if other clones are still alive.
    pub async fn rollback(self) -> Result<(), AppError> {
        match Arc::try_unwrap(self.0) {
            Ok(txn) => Ok(txn.rollback().await?),
            Err(_) => Err(AppError::internal(
                crate::errors::ErrorCode::Internal,
                "SharedTxn still has outstanding references",
            )),
        }
    }
}

/// Execute a closure within a database transaction.
///
/// 1) A SharedTxn in the request extensions is used as-is (no commit/rollback here).
/// 2) Otherwise a transaction is begun; on `Ok` the process `TxnPolicy` decides
///    between commit and rollback, on `Err` it is rolled back.
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    // Clone out of the extensions before awaiting so no RefCell borrow is held.
    let shared_txn = req.and_then(SharedTxn::from_req);

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let txn = require_db(state)?.begin().await?;

    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn_policy::current().finish(txn).await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

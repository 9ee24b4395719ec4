//! What `with_txn` does with a transaction whose closure returned `Ok`.

use std::sync::OnceLock;

use sea_orm::{DatabaseTransaction, DbErr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Production default
    CommitOnOk,
    /// Leave the database untouched even on success
    RollbackOnOk,
}

impl TxnPolicy {
    /// `"commit"` or `"rollback"`, case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "commit" => Some(Self::CommitOnOk),
            "rollback" => Some(Self::RollbackOnOk),
            _ => None,
        }
    }

    pub async fn finish(self, txn: DatabaseTransaction) -> Result<(), DbErr> {
        match self {
            Self::CommitOnOk => txn.commit().await,
            Self::RollbackOnOk => txn.rollback().await,
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Process-wide policy, `CommitOnOk` until one is installed.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Install the process-wide policy. Returns false if one was already set.
pub fn set_txn_policy(policy: TxnPolicy) -> bool {
    POLICY.set(policy).is_ok()
}

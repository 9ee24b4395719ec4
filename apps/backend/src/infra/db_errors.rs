//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert it here and
//! higher layers map `DomainError` to `AppError` via `From`.

use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Prefix of the structured payload adapters emit when a versioned write loses.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a unique violation message to a domain conflict.
///
/// SQLite reports the columns (`UNIQUE constraint failed: game_players.game_id,
/// game_players.symbol`), Postgres reports the index name.
fn map_unique_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("game_players.symbol")
        || error_msg.contains("game_players_game_id_symbol_key")
    {
        return Some((
            ConflictKind::DuplicateSymbol,
            "Symbol is already taken in this game",
        ));
    }
    None
}

fn optimistic_lock_error(payload: &str, trace_id: &str) -> DomainError {
    #[derive(serde::Deserialize)]
    struct LockInfo {
        entity: String,
        id: i64,
        expected: i32,
        actual: Option<i32>,
    }

    if let Ok(info) = serde_json::from_str::<LockInfo>(payload) {
        warn!(
            trace_id = %trace_id,
            entity = %info.entity,
            id = info.id,
            expected = info.expected,
            actual = ?info.actual,
            "Optimistic lock conflict detected"
        );
        return DomainError::conflict(
            ConflictKind::OptimisticLock,
            format!(
                "{} {} was modified concurrently (expected version {}). Please refresh and retry.",
                info.entity, info.id, info.expected
            ),
        );
    }

    warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
    DomainError::conflict(
        ConflictKind::OptimisticLock,
        "Resource was modified by another transaction; please retry",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            return optimistic_lock_error(&msg[OPTIMISTIC_LOCK_PREFIX.len()..], &trace_id);
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    let unique_violation = matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed");

    if unique_violation {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        if let Some((kind, detail)) = map_unique_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
        || mentions_sqlstate(&error_msg, "23503")
        || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

/// Build the `DbErr` an adapter returns when a versioned update matched no row.
pub fn optimistic_lock_db_err(entity: &str, id: i64, expected: i32, actual: Option<i32>) -> DbErr {
    let payload = serde_json::json!({
        "entity": entity,
        "id": id,
        "expected": expected,
        "actual": actual,
    });
    DbErr::Custom(format!("{OPTIMISTIC_LOCK_PREFIX}{payload}"))
}

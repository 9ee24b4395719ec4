//! Error codes for the Tycoon backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Tycoon backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// Caller's role does not allow this change
    InsufficientRole,

    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Invalid player ID provided
    InvalidPlayerId,
    /// Symbol is empty or malformed
    InvalidSymbol,
    /// Symbol already used in the same game
    DuplicateSymbol,
    /// Symbol cannot change once the game has started
    SymbolLocked,
    /// Wallet address longer than the stored column
    InvalidAddress,
    /// Trade balance is not a valid amount
    InvalidBalance,
    /// Game status can only move forward
    InvalidStatusTransition,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Player not found (or not part of the given game)
    PlayerNotFound,
    /// General not found error
    NotFound,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    // Conflicts
    /// Optimistic lock conflict
    OptimisticLock,
    /// Unique constraint violation
    UniqueViolation,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",

            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidPlayerId => "INVALID_PLAYER_ID",
            Self::InvalidSymbol => "INVALID_SYMBOL",
            Self::DuplicateSymbol => "DUPLICATE_SYMBOL",
            Self::SymbolLocked => "SYMBOL_LOCKED",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::InvalidBalance => "INVALID_BALANCE",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

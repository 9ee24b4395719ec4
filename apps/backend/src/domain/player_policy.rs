//! Field-level rules for changing a player's in-game state.
//!
//! Every mutable field has an entry in [`PLAYER_FIELD_POLICIES`]. A change
//! set is checked by walking the table in order, so when several rules are
//! violated the error of the earliest field wins (a locked `symbol` is
//! reported before a forbidden `in_jail`).

use crate::domain::money::normalize_balance;
use crate::domain::roles::CallerRole;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::repos::game_players::GamePlayer;
use crate::repos::games::Game;

/// Longest accepted board symbol, in characters
pub const MAX_SYMBOL_LEN: usize = 50;

/// Longest accepted wallet address, in characters
pub const MAX_ADDRESS_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerField {
    Symbol,
    Address,
    TradeLockedBalance,
    InJail,
}

impl PlayerField {
    /// Wire name of the field
    pub fn name(self) -> &'static str {
        match self {
            PlayerField::Symbol => "symbol",
            PlayerField::Address => "address",
            PlayerField::TradeLockedBalance => "trade_locked_balance",
            PlayerField::InJail => "in_jail",
        }
    }
}

/// Who may change a field, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub field: PlayerField,
    /// Frozen once the game is started or ended
    pub locked_once_started: bool,
    pub required_role: CallerRole,
}

pub const PLAYER_FIELD_POLICIES: [FieldPolicy; 4] = [
    FieldPolicy {
        field: PlayerField::Symbol,
        locked_once_started: true,
        required_role: CallerRole::Player,
    },
    FieldPolicy {
        field: PlayerField::Address,
        locked_once_started: false,
        required_role: CallerRole::Player,
    },
    FieldPolicy {
        field: PlayerField::TradeLockedBalance,
        locked_once_started: false,
        required_role: CallerRole::Player,
    },
    FieldPolicy {
        field: PlayerField::InJail,
        locked_once_started: false,
        required_role: CallerRole::Admin,
    },
];

/// Sparse change set; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerChanges {
    pub symbol: Option<String>,
    pub address: Option<String>,
    /// Raw amount text, normalised to two decimals on apply
    pub trade_locked_balance: Option<String>,
    pub in_jail: Option<bool>,
}

impl PlayerChanges {
    pub fn touches(&self, field: PlayerField) -> bool {
        match field {
            PlayerField::Symbol => self.symbol.is_some(),
            PlayerField::Address => self.address.is_some(),
            PlayerField::TradeLockedBalance => self.trade_locked_balance.is_some(),
            PlayerField::InJail => self.in_jail.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        PLAYER_FIELD_POLICIES.iter().all(|p| !self.touches(p.field))
    }
}

/// Whether the owning game is past setup.
///
/// A player whose game cannot be loaded points at broken referential
/// integrity; that is reported rather than read as "pending".
pub fn game_has_started(game: Option<&Game>, game_id: i64) -> Result<bool, DomainError> {
    match game {
        Some(game) => Ok(game.has_started()),
        None => Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Game {game_id} is missing for an existing player"),
        )),
    }
}

/// Walk the policy table and return the first violated rule.
pub fn check_changes(
    changes: &PlayerChanges,
    game_started: bool,
    role: CallerRole,
) -> Result<(), DomainError> {
    for policy in PLAYER_FIELD_POLICIES
        .iter()
        .filter(|p| changes.touches(p.field))
    {
        if policy.locked_once_started && game_started {
            let kind = match policy.field {
                PlayerField::Symbol => ValidationKind::SymbolLocked,
                other => ValidationKind::Other(format!("{}Locked", other.name())),
            };
            return Err(DomainError::validation(
                kind,
                format!("Cannot update {} after game has started", policy.field.name()),
            ));
        }
        if !role.satisfies(policy.required_role) {
            return Err(DomainError::forbidden(format!(
                "Only admin/system can update {}",
                policy.field.name()
            )));
        }
    }
    Ok(())
}

/// Symbol as stored: trimmed, non-empty, bounded.
pub fn validate_symbol(raw: &str) -> Result<String, DomainError> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidSymbol,
            "Symbol must not be empty",
        ));
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(DomainError::validation(
            ValidationKind::InvalidSymbol,
            format!("Symbol must be at most {MAX_SYMBOL_LEN} characters"),
        ));
    }
    Ok(symbol.to_string())
}

/// Address as stored: bounded, otherwise taken verbatim.
pub fn validate_address(raw: String) -> Result<String, DomainError> {
    if raw.chars().count() > MAX_ADDRESS_LEN {
        return Err(DomainError::validation(
            ValidationKind::InvalidAddress,
            format!("Address must be at most {MAX_ADDRESS_LEN} characters"),
        ));
    }
    Ok(raw)
}

/// Check `changes` and produce the full updated record. Nothing is written here.
pub fn apply_changes(
    player: &GamePlayer,
    changes: PlayerChanges,
    game_started: bool,
    role: CallerRole,
) -> Result<GamePlayer, DomainError> {
    check_changes(&changes, game_started, role)?;

    let mut updated = player.clone();
    if let Some(symbol) = changes.symbol {
        updated.symbol = validate_symbol(&symbol)?;
    }
    if let Some(address) = changes.address {
        updated.address = validate_address(address)?;
    }
    if let Some(balance) = changes.trade_locked_balance {
        updated.trade_locked_balance = normalize_balance(&balance)?;
    }
    if let Some(in_jail) = changes.in_jail {
        updated.in_jail = in_jail;
    }
    Ok(updated)
}

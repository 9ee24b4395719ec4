//! Player state service.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::domain::player_policy::{apply_changes, game_has_started};
use crate::domain::{CallerRole, PlayerChanges};
use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::game_players::{self as players_repo, GamePlayer};
use crate::repos::games as games_repo;

/// Reads and guarded updates of a player's in-game state.
pub struct GamePlayerService;

impl GamePlayerService {
    pub fn new() -> Self {
        Self
    }

    /// Player `player_id` under `game_id`, or `PLAYER_NOT_FOUND`.
    pub async fn find_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        player_id: i64,
    ) -> Result<GamePlayer, DomainError> {
        players_repo::require_player(conn, game_id, player_id).await
    }

    /// Apply a sparse change set to a player.
    ///
    /// All rules are checked before anything is written, then the full record
    /// is written exactly once (an empty change set still writes). Changing
    /// `symbol` also touches the owning game so that a concurrent start fails
    /// one side with `OPTIMISTIC_LOCK`. Run inside a transaction.
    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        player_id: i64,
        changes: PlayerChanges,
        role: CallerRole,
    ) -> Result<GamePlayer, DomainError> {
        let player = players_repo::require_player(conn, game_id, player_id).await?;

        let game = games_repo::find_by_id(conn, game_id).await?;
        let started = game_has_started(game.as_ref(), game_id)?;

        let symbol_changed = changes.symbol.is_some();
        debug!(
            game_id,
            player_id,
            started,
            ?role,
            symbol = changes.symbol.is_some(),
            address = changes.address.is_some(),
            trade_locked_balance = changes.trade_locked_balance.is_some(),
            in_jail = changes.in_jail.is_some(),
            "Checking player changes"
        );

        let updated = apply_changes(&player, changes, started, role)?;

        if symbol_changed {
            if let Some(game) = &game {
                games_repo::touch_game(conn, game.id, game.lock_version).await?;
            }
        }

        let saved = players_repo::save_player(conn, &updated).await?;

        info!(
            game_id,
            player_id,
            symbol = %saved.symbol,
            address = %Redacted(&saved.address),
            trade_locked_balance = %saved.trade_locked_balance,
            in_jail = saved.in_jail,
            lock_version = saved.lock_version,
            "Player state updated"
        );

        Ok(saved)
    }
}

impl Default for GamePlayerService {
    fn default() -> Self {
        Self::new()
    }
}

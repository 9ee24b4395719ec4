//! Game creation and lifecycle service.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::lifecycle::check_transition;
use crate::domain::player_policy::{validate_address, validate_symbol};
use crate::domain::CallerRole;
use crate::entities::games::GameStatus;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::game_players::{self as players_repo, GamePlayer};
use crate::repos::games::{self as games_repo, Game};

/// Initial player of a new game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub symbol: String,
    pub address: String,
}

/// A game with its players, in creation order
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithPlayers {
    pub game: Game,
    pub players: Vec<GamePlayer>,
}

pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Create a pending game together with its initial players.
    ///
    /// Symbols (non-empty, unique within the game) and address lengths are
    /// validated before anything is inserted. Run inside a transaction.
    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        players: Vec<NewPlayer>,
    ) -> Result<GameWithPlayers, DomainError> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(players.len());
        for player in players {
            let symbol = validate_symbol(&player.symbol)?;
            if !seen.insert(symbol.clone()) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicateSymbol,
                    format!("Symbol '{symbol}' is used more than once"),
                ));
            }
            let address = validate_address(player.address)?;
            validated.push((symbol, address));
        }

        let game = games_repo::create_game(conn).await?;

        let mut created = Vec::with_capacity(validated.len());
        for (symbol, address) in validated {
            created.push(players_repo::create_player(conn, game.id, &symbol, &address).await?);
        }

        info!(game_id = game.id, players = created.len(), "Game created");

        Ok(GameWithPlayers {
            game,
            players: created,
        })
    }

    /// Game and players, or `GAME_NOT_FOUND`.
    pub async fn find_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<GameWithPlayers, DomainError> {
        let game = games_repo::require_game(conn, game_id).await?;
        let players = players_repo::list_by_game(conn, game_id).await?;
        Ok(GameWithPlayers { game, players })
    }

    /// Move a game forward in its lifecycle. Admin only.
    pub async fn transition_status<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        target: GameStatus,
        role: CallerRole,
    ) -> Result<GameWithPlayers, DomainError> {
        if !role.is_admin() {
            return Err(DomainError::forbidden(
                "Only admin/system can change game status",
            ));
        }

        let current = games_repo::require_game(conn, game_id).await?;
        check_transition(current.status, target)?;

        let game =
            games_repo::update_status(conn, game_id, current.lock_version, target).await?;
        info!(
            game_id,
            from = current.status.as_str(),
            to = target.as_str(),
            lock_version = game.lock_version,
            "Game status changed"
        );

        let players = players_repo::list_by_game(conn, game_id).await?;
        Ok(GameWithPlayers { game, players })
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}

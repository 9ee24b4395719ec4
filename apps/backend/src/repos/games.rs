//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
use crate::entities::games::{self, GameStatus};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub status: GameStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    pub lock_version: i32,
}

impl Game {
    /// Started or ended: board tokens are fixed from here on.
    pub fn has_started(&self) -> bool {
        matches!(self.status, GameStatus::Started | GameStatus::Ended)
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Find game by ID or return `GAME_NOT_FOUND`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn).await?;
    Ok(Game::from(game))
}

/// Set a new status with optimistic locking.
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected_lock_version: i32,
    status: GameStatus,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdate::new(id, expected_lock_version).with_status(status);
    let game = games_adapter::update_game(conn, dto).await?;
    Ok(Game::from(game))
}

/// Bump lock_version without changing any game fields.
///
/// Fails with `OPTIMISTIC_LOCK` when the game changed since
/// `expected_lock_version` was read.
pub async fn touch_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected_lock_version: i32,
) -> Result<Game, DomainError> {
    let game = games_adapter::touch_game(conn, id, expected_lock_version).await?;
    Ok(Game::from(game))
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lock_version: model.lock_version,
        }
    }
}

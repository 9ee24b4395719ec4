//! Game player repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::game_players_sea as players_adapter;
use crate::entities::game_players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player state within one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePlayer {
    pub id: i64,
    pub game_id: i64,
    pub symbol: String,
    pub address: String,
    /// Two-decimal fixed-point text
    pub trade_locked_balance: String,
    pub in_jail: bool,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    pub lock_version: i32,
}

pub async fn find_by_game_and_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
) -> Result<Option<GamePlayer>, DomainError> {
    let player = players_adapter::find_by_game_and_id(conn, game_id, player_id).await?;
    Ok(player.map(GamePlayer::from))
}

/// Player under the given game, or `PLAYER_NOT_FOUND`.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
) -> Result<GamePlayer, DomainError> {
    find_by_game_and_id(conn, game_id, player_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("Player {player_id} not found in game {game_id}"),
            )
        })
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<GamePlayer>, DomainError> {
    let players = players_adapter::find_all_by_game(conn, game_id).await?;
    Ok(players.into_iter().map(GamePlayer::from).collect())
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    symbol: &str,
    address: &str,
) -> Result<GamePlayer, DomainError> {
    let dto = players_adapter::GamePlayerCreate::new(game_id, symbol).with_address(address);
    let player = players_adapter::create_player(conn, dto).await?;
    Ok(GamePlayer::from(player))
}

/// Persist the full record of `player`, guarded by its `lock_version`.
pub async fn save_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &GamePlayer,
) -> Result<GamePlayer, DomainError> {
    let dto = players_adapter::GamePlayerUpdate {
        id: player.id,
        game_id: player.game_id,
        symbol: player.symbol.clone(),
        address: player.address.clone(),
        trade_locked_balance: player.trade_locked_balance.clone(),
        in_jail: player.in_jail,
        expected_lock_version: player.lock_version,
    };
    let saved = players_adapter::update_player(conn, dto).await?;
    Ok(GamePlayer::from(saved))
}

impl From<game_players::Model> for GamePlayer {
    fn from(model: game_players::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            symbol: model.symbol,
            address: model.address,
            trade_locked_balance: model.trade_locked_balance,
            in_jail: model.in_jail,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lock_version: model.lock_version,
        }
    }
}

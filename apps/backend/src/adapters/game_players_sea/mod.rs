//! SeaORM adapter for game players.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::game_players;
use crate::infra::db_errors::optimistic_lock_db_err;

pub mod dto;

pub use dto::{GamePlayerCreate, GamePlayerUpdate};

/// Balance every new player starts with
pub const INITIAL_BALANCE: &str = "0.00";

/// Player `player_id`, only if it belongs to `game_id`.
pub async fn find_by_game_and_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
) -> Result<Option<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::Id.eq(player_id))
        .filter(game_players::Column::GameId.eq(game_id))
        .one(conn)
        .await
}

/// All players of a game in creation order.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .order_by_asc(game_players::Column::Id)
        .all(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GamePlayerCreate,
) -> Result<game_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let player_active = game_players::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        symbol: Set(dto.symbol),
        address: Set(dto.address),
        trade_locked_balance: Set(INITIAL_BALANCE.to_string()),
        in_jail: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    player_active.insert(conn).await
}

/// Write every mutable column of the player in one statement.
///
/// Matches on `(id, game_id, lock_version)`; zero affected rows is either
/// `RecordNotFound` or an optimistic-lock payload.
pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GamePlayerUpdate,
) -> Result<game_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = game_players::Entity::update_many()
        .col_expr(game_players::Column::Symbol, Expr::val(dto.symbol).into())
        .col_expr(game_players::Column::Address, Expr::val(dto.address).into())
        .col_expr(
            game_players::Column::TradeLockedBalance,
            Expr::val(dto.trade_locked_balance).into(),
        )
        .col_expr(game_players::Column::InJail, Expr::val(dto.in_jail).into())
        .col_expr(game_players::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_players::Column::LockVersion,
            Expr::col(game_players::Column::LockVersion).add(1),
        )
        .filter(game_players::Column::Id.eq(dto.id))
        .filter(game_players::Column::GameId.eq(dto.game_id))
        .filter(game_players::Column::LockVersion.eq(dto.expected_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_game_and_id(conn, dto.game_id, dto.id).await? {
            Some(player) => Err(optimistic_lock_db_err(
                "GamePlayer",
                dto.id,
                dto.expected_lock_version,
                Some(player.lock_version),
            )),
            None => Err(sea_orm::DbErr::RecordNotFound(
                "Game player not found".to_string(),
            )),
        };
    }

    find_by_game_and_id(conn, dto.game_id, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game player not found".to_string()))
}

//! SeaORM adapter for games.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::games;
use crate::infra::db_errors::optimistic_lock_db_err;

pub mod dto;

pub use dto::GameUpdate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return `RecordNotFound`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

/// Insert a new `pending` game at `lock_version = 1`.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        status: Set(games::GameStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    game_active.insert(conn).await
}

/// Apply an update guarded by `lock_version`, then refetch.
///
/// Bumps `lock_version` and `updated_at`. Zero affected rows means either the
/// game is gone (`RecordNotFound`) or another writer won (optimistic-lock payload).
pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let mut update = games::Entity::update_many()
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        );
    if let Some(status) = dto.status {
        update = update.col_expr(games::Column::Status, Expr::val(status.as_str()).into());
    }

    let result = update
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::LockVersion.eq(dto.expected_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(game) => Err(optimistic_lock_db_err(
                "Game",
                dto.id,
                dto.expected_lock_version,
                Some(game.lock_version),
            )),
            None => Err(sea_orm::DbErr::RecordNotFound("Game not found".to_string())),
        };
    }

    require_game(conn, dto.id).await
}

/// Bump `lock_version` without changing any game fields.
pub async fn touch_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected_lock_version: i32,
) -> Result<games::Model, sea_orm::DbErr> {
    update_game(conn, GameUpdate::new(id, expected_lock_version)).await
}

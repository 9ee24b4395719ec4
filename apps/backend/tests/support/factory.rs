//! Seed helpers that go through the repos, not raw SQL.

use sea_orm::ConnectionTrait;
use tycoon_backend::entities::games::GameStatus;
use tycoon_backend::repos::game_players::{self as players_repo, GamePlayer};
use tycoon_backend::repos::games::{self as games_repo, Game};

/// Pending game with one player per symbol (address `0x{symbol}`).
pub async fn seed_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    symbols: &[&str],
) -> (Game, Vec<GamePlayer>) {
    let game = games_repo::create_game(conn).await.expect("create game");
    let mut players = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let address = format!("0x{symbol}");
        players.push(
            players_repo::create_player(conn, game.id, symbol, &address)
                .await
                .expect("create player"),
        );
    }
    (game, players)
}

/// Same as `seed_game`, then moved to `status`.
pub async fn seed_game_with_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    symbols: &[&str],
    status: GameStatus,
) -> (Game, Vec<GamePlayer>) {
    let (mut game, players) = seed_game(conn, symbols).await;
    if status != GameStatus::Pending {
        game = games_repo::update_status(conn, game.id, game.lock_version, status)
            .await
            .expect("set status");
    }
    (game, players)
}

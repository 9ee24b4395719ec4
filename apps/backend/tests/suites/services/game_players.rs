use tycoon_backend::db::txn::SharedTxn;
use tycoon_backend::domain::{CallerRole, PlayerChanges};
use tycoon_backend::entities::games::GameStatus;
use tycoon_backend::errors::domain::{
    ConflictKind, DomainError, NotFoundKind, ValidationKind,
};
use tycoon_backend::repos::game_players as players_repo;
use tycoon_backend::repos::games as games_repo;
use tycoon_backend::services::game_players::GamePlayerService;

use crate::support::factory::{seed_game, seed_game_with_status};
use crate::support::test_state::conn;
use crate::support::build_test_state;

#[tokio::test]
async fn update_applies_only_present_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();
    let (game, players) = seed_game(txn, &["car"]).await;

    let changes = PlayerChanges {
        trade_locked_balance: Some("5".to_string()),
        ..Default::default()
    };
    let updated = GamePlayerService::new()
        .update(txn, game.id, players[0].id, changes, CallerRole::Player)
        .await?;

    assert_eq!(updated.trade_locked_balance, "5.00");
    assert_eq!(updated.symbol, "car");
    assert_eq!(updated.address, "0xcar");
    assert!(!updated.in_jail);
    assert_eq!(updated.lock_version, players[0].lock_version + 1);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn stale_player_write_is_optimistic_lock() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();
    let (_, players) = seed_game(txn, &["car"]).await;
    let stale = players[0].clone();

    players_repo::save_player(txn, &stale).await?;

    let err = players_repo::save_player(txn, &stale).await.unwrap_err();
    match err {
        DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
            assert!(detail.contains(&format!("expected version {}", stale.lock_version)));
        }
        other => panic!("expected OptimisticLock, got {other:?}"),
    }

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn symbol_change_conflicts_with_concurrent_start() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();
    let (game, _) = seed_game(txn, &["car"]).await;

    // A start lands after the game was read: its version moved on
    games_repo::update_status(txn, game.id, game.lock_version, GameStatus::Started).await?;
    let err = games_repo::touch_game(txn, game.id, game.lock_version)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::OptimisticLock, _)
    ));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn rules_checked_before_any_write() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();
    let (game, players) = seed_game_with_status(txn, &["car"], GameStatus::Started).await;
    let service = GamePlayerService::new();

    let changes = PlayerChanges {
        symbol: Some("hat".to_string()),
        in_jail: Some(true),
        ..Default::default()
    };
    let err = service
        .update(txn, game.id, players[0].id, changes, CallerRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::SymbolLocked, _)
    ));

    let changes = PlayerChanges {
        address: Some("0xnew".to_string()),
        in_jail: Some(true),
        ..Default::default()
    };
    let err = service
        .update(txn, game.id, players[0].id, changes, CallerRole::Player)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let stored = players_repo::require_player(txn, game.id, players[0].id).await?;
    assert_eq!(stored.lock_version, players[0].lock_version);
    assert_eq!(stored.address, "0xcar");

    // Game untouched too
    let stored_game = games_repo::require_game(txn, game.id).await?;
    assert_eq!(stored_game.lock_version, game.lock_version);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn find_player_checks_pairing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();
    let (first, first_players) = seed_game(txn, &["car"]).await;
    let (second, _) = seed_game(txn, &["car"]).await;
    let service = GamePlayerService::new();

    let found = service.find_player(txn, first.id, first_players[0].id).await?;
    assert_eq!(found.id, first_players[0].id);

    let err = service
        .find_player(txn, second.id, first_players[0].id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));

    shared.rollback().await?;
    Ok(())
}

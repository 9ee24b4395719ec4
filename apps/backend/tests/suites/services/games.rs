use tycoon_backend::db::txn::SharedTxn;
use tycoon_backend::domain::CallerRole;
use tycoon_backend::entities::games::GameStatus;
use tycoon_backend::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use tycoon_backend::services::games::{GameService, NewPlayer};

use crate::support::build_test_state;
use crate::support::test_state::conn;

fn new_player(symbol: &str) -> NewPlayer {
    NewPlayer {
        symbol: symbol.to_string(),
        address: format!("0x{symbol}"),
    }
}

#[tokio::test]
async fn create_keeps_player_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();
    let service = GameService::new();

    let created = service
        .create(txn, vec![new_player("car"), new_player("hat"), new_player("boot")])
        .await?;
    assert_eq!(created.game.status, GameStatus::Pending);
    assert_eq!(created.game.lock_version, 1);
    let symbols: Vec<_> = created.players.iter().map(|p| p.symbol.as_str()).collect();
    assert_eq!(symbols, ["car", "hat", "boot"]);

    let found = service.find_game(txn, created.game.id).await?;
    assert_eq!(found.game.id, created.game.id);
    let found_ids: Vec<_> = found.players.iter().map(|p| p.id).collect();
    let created_ids: Vec<_> = created.players.iter().map(|p| p.id).collect();
    assert_eq!(found_ids, created_ids);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn create_rejects_overlong_address() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();

    let mut player = new_player("car");
    player.address = "a".repeat(256);
    let err = GameService::new()
        .create(txn, vec![new_player("hat"), player])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidAddress, _)
    ));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn create_rejects_duplicates_after_trimming() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();

    let err = GameService::new()
        .create(txn, vec![new_player("car"), new_player(" car ")])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::DuplicateSymbol, _)
    ));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn transition_rules() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let shared = SharedTxn::open(conn(&state)).await?;
    let txn = shared.transaction();
    let service = GameService::new();
    let created = service.create(txn, vec![new_player("car")]).await?;
    let id = created.game.id;

    let err = service
        .transition_status(txn, id, GameStatus::Started, CallerRole::Player)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    // Pending straight to ended is allowed
    let ended = service
        .transition_status(txn, id, GameStatus::Ended, CallerRole::Admin)
        .await?;
    assert_eq!(ended.game.status, GameStatus::Ended);
    assert_eq!(ended.game.lock_version, created.game.lock_version + 1);

    let err = service
        .transition_status(txn, id, GameStatus::Started, CallerRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidStatusTransition, _)
    ));

    let err = service.find_game(txn, id + 1).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));

    shared.rollback().await?;
    Ok(())
}

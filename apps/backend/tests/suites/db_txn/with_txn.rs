use tycoon_backend::db::txn::with_txn;
use tycoon_backend::error::AppError;
use tycoon_backend::errors::ErrorCode;
use tycoon_backend::repos::games as games_repo;

use crate::support::build_test_state;
use crate::support::test_state::conn;

#[tokio::test]
async fn ok_result_is_committed() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;

    let game_id = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok(games_repo::create_game(txn).await?.id) })
    })
    .await?;

    let found = games_repo::find_by_id(conn(&state), game_id).await?;
    assert!(found.is_some());
    Ok(())
}

#[tokio::test]
async fn err_result_is_rolled_back() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;

    let result: Result<i64, AppError> = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let game = games_repo::create_game(txn).await?;
            Err(AppError::bad_request(
                ErrorCode::BadRequest,
                format!("abandon game {}", game.id),
            ))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);

    // First id would have been 1
    let found = games_repo::find_by_id(conn(&state), 1).await?;
    assert!(found.is_none());
    Ok(())
}

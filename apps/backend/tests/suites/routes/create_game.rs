use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::{assert_problem, read_json};
use crate::support::{build_test_state, create_test_app};

fn post_game(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/api/games").set_json(body)
}

#[actix_web::test]
async fn create_game_with_players() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = post_game(json!({
        "players": [
            { "symbol": "car", "address": "0xaaa" },
            { "symbol": " hat " }
        ]
    }))
    .to_request();
    let body: Value = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["status"], "pending");
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());

    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["symbol"], "car");
    assert_eq!(players[0]["address"], "0xaaa");
    assert_eq!(players[0]["trade_locked_balance"], "0.00");
    assert_eq!(players[0]["in_jail"], false);
    assert_eq!(players[1]["symbol"], "hat");
    assert_eq!(players[1]["address"], "");
    assert_eq!(players[1]["game_id"], body["id"]);
    Ok(())
}

#[actix_web::test]
async fn create_empty_game_then_fetch() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = post_game(json!({})).to_request();
    let created: Value =
        read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(created["players"], json!([]));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", created["id"]))
        .to_request();
    let fetched: Value = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["status"], "pending");
    Ok(())
}

#[actix_web::test]
async fn create_rejects_bad_symbols() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = post_game(json!({ "players": [{ "symbol": "   " }] })).to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_SYMBOL",
        Some("must not be empty"),
    )
    .await;

    let req = post_game(json!({
        "players": [{ "symbol": "car", "address": "a".repeat(256) }]
    }))
    .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_ADDRESS",
        Some("at most 255 characters"),
    )
    .await;

    let req = post_game(json!({
        "players": [{ "symbol": "car" }, { "symbol": "car" }]
    }))
    .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "DUPLICATE_SYMBOL",
        Some("car"),
    )
    .await;

    // Nothing was created by the rejected requests
    let req = test::TestRequest::get().uri("/api/games/1").to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "GAME_NOT_FOUND",
        Some("Game 1 not found"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn create_rejects_malformed_json() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"players\": [")
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        None,
    )
    .await;
    Ok(())
}

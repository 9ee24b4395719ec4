use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::common::assert_problem;
use crate::support::auth::{mint_expired_token, mint_test_token};
use crate::support::factory::seed_game;
use crate::support::test_state::conn;
use crate::support::{build_test_state, create_test_app};
use tycoon_backend::state::security_config::SecurityConfig;

#[actix_web::test]
async fn patch_requires_bearer() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let (game, players) = seed_game(conn(&state), &["car"]).await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let uri = format!("/api/games/{}/players/{}", game.id, players[0].id);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "address": "0x1" }))
        .to_request();
    let problem = assert_problem(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_MISSING_BEARER",
        None,
    )
    .await;
    assert!(!problem.trace_id.is_empty());

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .set_json(json!({ "address": "0x1" }))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_MISSING_BEARER",
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn bad_and_expired_tokens_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let (game, players) = seed_game(conn(&state), &["car"]).await;
    let sec = state.security.clone();
    let app = create_test_app(state).with_prod_routes().build().await?;

    let uri = format!("/api/games/{}/players/{}", game.id, players[0].id);

    let foreign = SecurityConfig::new("some_other_secret_entirely".as_bytes());
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header((
            "Authorization",
            format!("Bearer {}", mint_test_token("p", None, &foreign)),
        ))
        .set_json(json!({}))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_INVALID_JWT",
        None,
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header((
            "Authorization",
            format!("Bearer {}", mint_expired_token("p", &sec)),
        ))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_problem(
        resp,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_EXPIRED_JWT",
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn reads_do_not_need_a_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let (game, players) = seed_game(conn(&state), &["car"]).await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/players/{}", game.id, players[0].id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::Value;
use tycoon_backend::state::app_state::AppState;

use crate::common::read_json;
use crate::support::auth::test_security;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("x-trace-id").is_some());
    let body: Value = read_json(resp, StatusCode::OK).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20250901_000001_init");
    assert!(body["app_version"].is_string());
    assert!(body["time"].is_string());
    Ok(())
}

#[actix_web::test]
async fn health_without_db_still_answers() -> Result<(), Box<dyn std::error::Error>> {
    let state = web::Data::new(AppState::new_without_db(test_security()));
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "unavailable");
    Ok(())
}

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use parcel_backend::auth::Role;

use crate::support::auth::bearer_header;
use crate::support::factory::create_user;
use crate::support::{build_test_state, create_test_app, test_security};

#[actix_web::test]
async fn error_trace_id_matches_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/parcels/mine").to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header");

    let body = assert_error_response(resp, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", None).await;
    assert_eq!(body.trace_id, request_id);
    assert_ne!(body.trace_id, "unknown");
    Ok(())
}

#[actix_web::test]
async fn each_request_gets_its_own_trace_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let first = assert_error_response(
        test::call_service(&app, test::TestRequest::get().uri("/users/me").to_request()).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHENTICATED",
        None,
    )
    .await;
    let second = assert_error_response(
        test::call_service(&app, test::TestRequest::get().uri("/users/me").to_request()).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHENTICATED",
        None,
    )
    .await;
    assert_ne!(first.trace_id, second.trace_id);
    Ok(())
}

#[actix_web::test]
async fn malformed_identifier_is_400_not_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri("/users/not-an-id/role")
        .insert_header(("Authorization", bearer_header(&admin.email, &sec)))
        .set_json(serde_json::json!({ "role": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_IDENTIFIER",
        Some("Invalid resource identifier"),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/reviews/12345")
        .insert_header(("Authorization", bearer_header(&admin.email, &sec)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "INVALID_IDENTIFIER", None).await;
    Ok(())
}

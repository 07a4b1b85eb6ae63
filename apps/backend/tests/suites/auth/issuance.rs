use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use parcel_backend::auth::Role;
use parcel_backend::verify_access_token;
use serde_json::json;

use crate::support::factory::create_user;
use crate::support::{build_test_state, create_test_app, test_security};

#[actix_web::test]
async fn issued_token_is_accepted_by_protected_routes() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let user = create_user(state.db(), "jwt", Role::Customer).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "email": user.email, "name": "Jay" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token string").to_string();

    let claims = verify_access_token(&token, &test_security())?;
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.extra.get("name"), Some(&json!("Jay")));

    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn unregistered_email_gets_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "email": "nobody@example.test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, StatusCode::FORBIDDEN, "FORBIDDEN_USER_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn missing_or_bad_email_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "name": "no email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None).await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "INVALID_EMAIL", None).await;
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", None).await;
    Ok(())
}

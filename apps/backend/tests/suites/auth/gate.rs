use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use parcel_backend::auth::Role;
use parcel_backend::repos::{reviews, users};
use parcel_backend::services::reviews::{create as create_review, ReviewInput};
use serde_json::json;
use uuid::Uuid;

use crate::support::auth::bearer_header;
use crate::support::factory::create_user;
use crate::support::{build_test_state, create_test_app, test_security};

#[actix_web::test]
async fn customer_is_refused_on_admin_route() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = create_user(state.db(), "cust", Role::Customer).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(("Authorization", bearer_header(&customer.email, &sec)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(
        resp,
        StatusCode::FORBIDDEN,
        "INSUFFICIENT_ROLE",
        Some("admin role required"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn unregistered_caller_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(("Authorization", bearer_header("ghost@example.test", &sec)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, StatusCode::FORBIDDEN, "FORBIDDEN_USER_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn admin_does_not_imply_delivery_man() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/parcels/assigned")
        .insert_header(("Authorization", bearer_header(&admin.email, &sec)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(
        resp,
        StatusCode::FORBIDDEN,
        "INSUFFICIENT_ROLE",
        Some("delivery_man role required"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn refused_caller_does_not_mutate() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = create_user(state.db(), "cust", Role::Customer).await?;
    let target = create_user(state.db(), "target", Role::Customer).await?;
    let db = state.clone();
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}/role", target.id))
        .insert_header(("Authorization", bearer_header(&customer.email, &sec)))
        .set_json(json!({ "role": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE", None).await;

    let unchanged = users::find_by_id(db.db(), target.id).await?.expect("target exists");
    assert_eq!(unchanged.role, Role::Customer);
    Ok(())
}

#[actix_web::test]
async fn privilege_is_checked_before_the_body() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = create_user(state.db(), "cust", Role::Customer).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}/role", Uuid::new_v4()))
        .insert_header(("Authorization", bearer_header(&customer.email, &sec)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE", None).await;
    Ok(())
}

#[actix_web::test]
async fn admin_delete_runs_exactly_once() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let rider = create_user(state.db(), "rider", Role::DeliveryMan).await?;
    let reviewer = create_user(state.db(), "rev", Role::Customer).await?;
    let review = create_review(
        state.db(),
        &reviewer,
        ReviewInput {
            delivery_man_id: rider.id,
            rating: 4,
            feedback: "On time".to_string(),
        },
    )
    .await?;
    let db = state.clone();
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/reviews/{}", review.id))
        .insert_header(("Authorization", bearer_header(&admin.email, &sec)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(reviews::list_for_delivery_man(db.db(), rider.id).await?.is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("/reviews/{}", review.id))
        .insert_header(("Authorization", bearer_header(&admin.email, &sec)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "REVIEW_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn revoked_role_applies_to_the_next_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let db = state.clone();
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;
    let header = bearer_header(&admin.email, &sec);

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(("Authorization", header.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    users::update_role(db.db(), admin.id, Role::Customer).await?;

    // Same token, same claims: the store decides.
    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(("Authorization", header))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE", None).await;
    Ok(())
}

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use parcel_backend::auth::Role;
use parcel_backend::entities::parcels::ParcelStatus;
use parcel_backend::repos::users::User;
use parcel_backend::SecurityConfig;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::support::auth::bearer_header;
use crate::support::factory::{book_parcel, create_user, parcel_input};
use crate::support::{build_test_state, create_test_app, test_security};

fn booking_json(weight_kg: f64) -> Value {
    Value::Object(booking(weight_kg))
}

fn booking(weight_kg: f64) -> serde_json::Map<String, Value> {
    let input = parcel_input(weight_kg);
    let mut map = serde_json::Map::new();
    map.insert("owner_phone".into(), json!(input.owner_phone));
    map.insert("parcel_type".into(), json!(input.parcel_type));
    map.insert("weight_kg".into(), json!(input.weight_kg));
    map.insert("receiver_name".into(), json!(input.receiver_name));
    map.insert("receiver_phone".into(), json!(input.receiver_phone));
    map.insert("delivery_address".into(), json!(input.delivery_address));
    map.insert("latitude".into(), json!(input.latitude));
    map.insert("longitude".into(), json!(input.longitude));
    map.insert(
        "requested_delivery_date".into(),
        json!(input.requested_delivery_date),
    );
    map
}

fn auth(user: &User, sec: &SecurityConfig) -> (&'static str, String) {
    ("Authorization", bearer_header(&user.email, sec))
}

#[actix_web::test]
async fn booking_prices_by_weight() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    for (weight, price) in [(0.5, 50.0), (2.0, 100.0), (7.5, 150.0)] {
        let mut body = booking(weight);
        // Client-supplied price is ignored.
        body.insert("price".into(), json!(1));
        let req = test::TestRequest::post()
            .uri("/parcels")
            .insert_header(auth(&owner, &sec))
            .set_json(Value::Object(body))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let parcel: Value = test::read_body_json(resp).await;
        assert_eq!(parcel["price"], json!(price));
        assert_eq!(parcel["status"], "pending");
        assert_eq!(parcel["owner_email"], json!(owner.email));
    }

    let req = test::TestRequest::get()
        .uri("/parcels/mine")
        .insert_header(auth(&owner, &sec))
        .to_request();
    let mine: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(mine.len(), 3);
    Ok(())
}

#[actix_web::test]
async fn booking_rejects_bad_weight_and_unregistered_owner(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/parcels")
        .insert_header(auth(&owner, &sec))
        .set_json(booking_json(250.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "INVALID_WEIGHT", None).await;

    let req = test::TestRequest::post()
        .uri("/parcels")
        .insert_header(("Authorization", bearer_header("drifter@example.test", &sec)))
        .set_json(booking_json(1.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "FORBIDDEN_USER_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn owner_edits_and_cancels_pending_parcel() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    let other = create_user(state.db(), "other", Role::Customer).await?;
    let parcel = book_parcel(state.db(), &owner, 1.0).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}", parcel.id))
        .insert_header(auth(&other, &sec))
        .set_json(booking_json(3.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "NOT_OWNER", None).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}", parcel.id))
        .insert_header(auth(&owner, &sec))
        .set_json(booking_json(3.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let edited: Value = test::read_body_json(resp).await;
    assert_eq!(edited["weight_kg"], json!(3.0));
    assert_eq!(edited["price"], json!(150.0));

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/cancel", parcel.id))
        .insert_header(auth(&owner, &sec))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cancelled: Value = test::read_body_json(resp).await;
    assert_eq!(cancelled["status"], "cancelled");

    // Terminal: neither a second cancel nor an edit is allowed.
    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/cancel", parcel.id))
        .insert_header(auth(&owner, &sec))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION", None).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}", parcel.id))
        .insert_header(auth(&owner, &sec))
        .set_json(booking_json(1.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION", None).await;
    Ok(())
}

#[actix_web::test]
async fn assignment_and_delivery_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let rider = create_user(state.db(), "rider", Role::DeliveryMan).await?;
    let other_rider = create_user(state.db(), "rider2", Role::DeliveryMan).await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    let parcel = book_parcel(state.db(), &owner, 1.5).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    // Customers cannot be assigned parcels.
    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/assign", parcel.id))
        .insert_header(auth(&admin, &sec))
        .set_json(json!({ "delivery_man_id": owner.id, "approximate_delivery_date": "2026-11-03" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::CONFLICT, "NOT_A_DELIVERY_MAN", None).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/assign", parcel.id))
        .insert_header(auth(&admin, &sec))
        .set_json(json!({ "delivery_man_id": rider.id, "approximate_delivery_date": "2026-11-03" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let assigned: Value = test::read_body_json(resp).await;
    assert_eq!(assigned["status"], "on_the_way");
    assert_eq!(assigned["delivery_man_id"], json!(rider.id));
    assert_eq!(assigned["approximate_delivery_date"], "2026-11-03");

    // Already on the way: the owner can no longer cancel.
    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/cancel", parcel.id))
        .insert_header(auth(&owner, &sec))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION", None).await;

    let req = test::TestRequest::get()
        .uri("/parcels/assigned")
        .insert_header(auth(&rider, &sec))
        .to_request();
    let list: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(list.len(), 1);

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/status", parcel.id))
        .insert_header(auth(&other_rider, &sec))
        .set_json(json!({ "status": "delivered" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "NOT_OWNER", None).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/status", parcel.id))
        .insert_header(auth(&rider, &sec))
        .set_json(json!({ "status": "cancelled" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "INVALID_ENUM_VALUE", None).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/status", parcel.id))
        .insert_header(auth(&rider, &sec))
        .set_json(json!({ "status": "delivered" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let delivered: Value = test::read_body_json(resp).await;
    assert_eq!(delivered["status"], "delivered");

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/status", parcel.id))
        .insert_header(auth(&rider, &sec))
        .set_json(json!({ "status": "returned" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION", None).await;
    Ok(())
}

#[actix_web::test]
async fn admin_filters_all_parcels_by_status() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    book_parcel(state.db(), &owner, 1.0).await?;
    let second = book_parcel(state.db(), &owner, 1.0).await?;
    parcel_backend::services::parcels::cancel(state.db(), &owner.email, second.id).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/parcels")
        .insert_header(auth(&admin, &sec))
        .to_request();
    let all: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(all.len(), 2);

    let req = test::TestRequest::get()
        .uri("/parcels?status=cancelled")
        .insert_header(auth(&admin, &sec))
        .to_request();
    let cancelled: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0]["id"], json!(second.id));

    let req = test::TestRequest::get()
        .uri("/parcels?status=lost")
        .insert_header(auth(&admin, &sec))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "INVALID_ENUM_VALUE", None).await;
    Ok(())
}

#[actix_web::test]
async fn unknown_parcel_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/cancel", Uuid::new_v4()))
        .insert_header(auth(&owner, &sec))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "PARCEL_NOT_FOUND", None).await;
    Ok(())
}

async fn assign_to(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    admin_header: &(&'static str, String),
    parcel_id: Uuid,
    rider: &User,
) -> StatusCode {
    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{parcel_id}/assign"))
        .insert_header(admin_header.clone())
        .set_json(json!({ "delivery_man_id": rider.id, "approximate_delivery_date": "2026-11-04" }))
        .to_request();
    test::call_service(app, req).await.status()
}

#[actix_web::test]
async fn deleting_the_assignee_returns_parcel_to_pending() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let rider = create_user(state.db(), "rider", Role::DeliveryMan).await?;
    let backup = create_user(state.db(), "backup", Role::DeliveryMan).await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    let parcel = book_parcel(state.db(), &owner, 1.0).await?;
    let db = state.clone();
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;
    let admin_header = auth(&admin, &sec);

    assert_eq!(assign_to(&app, &admin_header, parcel.id, &rider).await, StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", rider.id))
        .insert_header(admin_header.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let released = parcel_backend::repos::parcels::find_by_id(db.db(), parcel.id)
        .await?
        .expect("parcel exists");
    assert_eq!(released.status, ParcelStatus::Pending);
    assert_eq!(released.delivery_man_id, None);
    assert_eq!(released.approximate_delivery_date, None);

    assert_eq!(assign_to(&app, &admin_header, parcel.id, &backup).await, StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn demoting_the_assignee_returns_parcel_to_pending() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let admin = create_user(state.db(), "adm", Role::Admin).await?;
    let rider = create_user(state.db(), "rider", Role::DeliveryMan).await?;
    let owner = create_user(state.db(), "owner", Role::Customer).await?;
    let parcel = book_parcel(state.db(), &owner, 1.0).await?;
    let finished = book_parcel(state.db(), &owner, 1.0).await?;
    let sec = test_security();
    let app = create_test_app(state).with_prod_routes().build().await;
    let admin_header = auth(&admin, &sec);

    assert_eq!(assign_to(&app, &admin_header, parcel.id, &rider).await, StatusCode::OK);
    assert_eq!(assign_to(&app, &admin_header, finished.id, &rider).await, StatusCode::OK);
    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/status", finished.id))
        .insert_header(auth(&rider, &sec))
        .set_json(json!({ "status": "delivered" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}/role", rider.id))
        .insert_header(admin_header.clone())
        .set_json(json!({ "role": "customer" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/parcels/mine")
        .insert_header(auth(&owner, &sec))
        .to_request();
    let mine: Vec<Value> = test::read_body_json(test::call_service(&app, req).await).await;
    let status_of = |id: Uuid| {
        mine.iter()
            .find(|p| p["id"] == json!(id))
            .map(|p| (p["status"].clone(), p["delivery_man_id"].clone()))
            .expect("parcel listed")
    };
    assert_eq!(status_of(parcel.id), (json!("pending"), Value::Null));
    // Finished work keeps its history.
    assert_eq!(status_of(finished.id), (json!("delivered"), json!(rider.id)));

    // The owner may cancel again now that it is pending.
    let req = test::TestRequest::patch()
        .uri(&format!("/parcels/{}/cancel", parcel.id))
        .insert_header(auth(&owner, &sec))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    Ok(())
}

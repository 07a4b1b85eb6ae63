use backend_test_support::unique_helpers::unique_email;
use parcel_backend::auth::Role;
use parcel_backend::repos::parcels::Parcel;
use parcel_backend::repos::users::{self, User, UserCreate};
use parcel_backend::services::parcels::{book, ParcelInput};
use parcel_backend::AppError;
use sea_orm::ConnectionTrait;

/// Register a user with a unique email and give it `role`.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
    role: Role,
) -> Result<User, AppError> {
    let email = unique_email(prefix);
    let (user, _) = users::register(conn, UserCreate::new(format!("{prefix} user"), email)).await?;
    if role != Role::Customer {
        users::update_role(conn, user.id, role).await?;
    }
    Ok(users::find_by_id(conn, user.id)
        .await?
        .expect("user just created"))
}

pub fn parcel_input(weight_kg: f64) -> ParcelInput {
    ParcelInput {
        owner_phone: "+8801700000000".to_string(),
        parcel_type: "Documents".to_string(),
        weight_kg,
        receiver_name: "Receiver".to_string(),
        receiver_phone: "+8801800000000".to_string(),
        delivery_address: "12 Lake Road, Dhaka".to_string(),
        latitude: 23.81,
        longitude: 90.41,
        requested_delivery_date: "2026-11-01".to_string(),
    }
}

pub async fn book_parcel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: &User,
    weight_kg: f64,
) -> Result<Parcel, AppError> {
    book(conn, owner, parcel_input(weight_kg)).await
}

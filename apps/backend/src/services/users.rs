use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::roles::Role;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::logging::pii::Redacted;
use crate::repos::parcels;
use crate::repos::users::{self, User, UserCreate};
use crate::utils::email::parse_email;

/// Profile sent by the client after external sign-up.
///
/// There is no `role` field: every new account starts as a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

/// Register the user unless the (normalised) email already exists.
///
/// Returns the stored user and whether it was created by this call.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: RegisterUser,
) -> Result<(User, bool), AppError> {
    let email = parse_email(&input.email)?;
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other("name".into()),
            "name must not be empty",
        )
        .into());
    }

    let mut dto = UserCreate::new(name, email);
    if let Some(phone) = input.phone.filter(|p| !p.trim().is_empty()) {
        dto = dto.with_phone(phone);
    }
    if let Some(url) = input.image_url.filter(|u| !u.trim().is_empty()) {
        dto = dto.with_image_url(url);
    }

    let (user, inserted) = users::register(conn, dto).await?;
    if inserted {
        info!(user_id = %user.id, email = %Redacted(&user.email), "user registered");
    }
    Ok((user, inserted))
}

/// Give user `id` a new role.
///
/// Leaving `delivery_man` hands any `on_the_way` parcels back to `pending`
/// in the same transaction so an admin can reassign them.
pub async fn change_role<C: TransactionTrait>(
    conn: &C,
    id: Uuid,
    role: Role,
) -> Result<User, AppError> {
    let txn = conn.begin().await?;

    let released = if role == Role::DeliveryMan {
        0
    } else {
        parcels::release_assignments(&txn, id).await?
    };
    users::update_role(&txn, id, role).await?;
    let user = users::find_by_id(&txn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::User, format!("User {id} not found"))
    })?;

    txn.commit().await?;

    if released > 0 {
        info!(user_id = %id, released, "in-flight parcels returned to pending");
    }
    Ok(user)
}

/// Delete user `id`, first returning their in-flight parcels to `pending`.
pub async fn remove<C: TransactionTrait>(conn: &C, id: Uuid) -> Result<(), AppError> {
    let txn = conn.begin().await?;

    let released = parcels::release_assignments(&txn, id).await?;
    users::delete(&txn, id).await?;

    txn.commit().await?;

    if released > 0 {
        info!(user_id = %id, released, "in-flight parcels returned to pending");
    }
    Ok(())
}

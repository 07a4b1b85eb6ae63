//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::adapters::users_sea as users_adapter;
use crate::auth::roles::Role;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use users_adapter::UserCreate;

/// User domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

fn user_not_found(id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::User, format!("User {id} not found"))
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, id).await?;
    Ok(user.map(User::from))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_all(conn).await?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn list_by_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role: Role,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_by_role(conn, role).await?;
    Ok(users.into_iter().map(User::from).collect())
}

/// Register a customer; an existing email is returned unchanged.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<(User, bool), DomainError> {
    let (user, inserted) = users_adapter::insert_if_absent(conn, dto).await?;
    Ok((User::from(user), inserted))
}

pub async fn update_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    role: Role,
) -> Result<(), DomainError> {
    match users_adapter::update_role(conn, id, role).await? {
        0 => Err(user_not_found(id)),
        _ => Ok(()),
    }
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: Uuid) -> Result<(), DomainError> {
    match users_adapter::delete_by_id(conn, id).await? {
        0 => Err(user_not_found(id)),
        _ => Ok(()),
    }
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            phone: model.phone,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

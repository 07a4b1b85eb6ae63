//! SeaORM adapter for the users table.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::auth::roles::Role;
use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id).one(conn).await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::CreatedAt)
        .order_by_asc(users::Column::Email)
        .all(conn)
        .await
}

pub async fn list_by_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role: Role,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .order_by_asc(users::Column::CreatedAt)
        .order_by_asc(users::Column::Email)
        .all(conn)
        .await
}

/// Insert a customer unless the email is already registered.
///
/// Returns the stored row and whether this call created it.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<(users::Model, bool), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let email = dto.email.clone();

    let user_active = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(dto.name),
        email: Set(dto.email),
        role: Set(Role::Customer),
        phone: Set(dto.phone),
        image_url: Set(dto.image_url),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = users::Entity::insert(user_active)
        .on_conflict(
            OnConflict::column(users::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let inserted = rows == 1;
    let user = find_by_email(conn, &email)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users.email not found".to_string()))?;

    Ok((user, inserted))
}

/// Returns the number of rows updated (0 when `id` is unknown).
pub async fn update_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    role: Role,
) -> Result<u64, sea_orm::DbErr> {
    let res = users::Entity::update_many()
        .set(users::ActiveModel {
            role: Set(role),
            updated_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        })
        .filter(users::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Returns the number of rows deleted (0 when `id` is unknown).
pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = users::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}


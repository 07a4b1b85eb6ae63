//! SeaORM adapter for the reviews table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::reviews;

pub mod dto;

pub use dto::ReviewCreate;

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ReviewCreate,
) -> Result<reviews::Model, sea_orm::DbErr> {
    let review_active = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        delivery_man_id: Set(dto.delivery_man_id),
        reviewer_email: Set(dto.reviewer_email),
        reviewer_name: Set(dto.reviewer_name),
        reviewer_image_url: Set(dto.reviewer_image_url),
        rating: Set(dto.rating),
        feedback: Set(dto.feedback),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    review_active.insert(conn).await
}

/// Newest first.
pub async fn list_for_delivery_man<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    delivery_man_id: Uuid,
) -> Result<Vec<reviews::Model>, sea_orm::DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::DeliveryManId.eq(delivery_man_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .order_by_desc(reviews::Column::Id)
        .all(conn)
        .await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = reviews::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

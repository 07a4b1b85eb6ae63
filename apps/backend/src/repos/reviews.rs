//! Review repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::adapters::reviews_sea as reviews_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use reviews_adapter::ReviewCreate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: Uuid,
    pub delivery_man_id: Uuid,
    pub reviewer_email: String,
    pub reviewer_name: String,
    pub reviewer_image_url: Option<String>,
    pub rating: i32,
    pub feedback: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ReviewCreate,
) -> Result<Review, DomainError> {
    let review = reviews_adapter::insert(conn, dto).await?;
    Ok(Review::from(review))
}

pub async fn list_for_delivery_man<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    delivery_man_id: Uuid,
) -> Result<Vec<Review>, DomainError> {
    let reviews = reviews_adapter::list_for_delivery_man(conn, delivery_man_id).await?;
    Ok(reviews.into_iter().map(Review::from).collect())
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: Uuid) -> Result<(), DomainError> {
    match reviews_adapter::delete_by_id(conn, id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Review,
            format!("Review {id} not found"),
        )),
        _ => Ok(()),
    }
}

impl From<crate::entities::reviews::Model> for Review {
    fn from(model: crate::entities::reviews::Model) -> Self {
        Self {
            id: model.id,
            delivery_man_id: model.delivery_man_id,
            reviewer_email: model.reviewer_email,
            reviewer_name: model.reviewer_name,
            reviewer_image_url: model.reviewer_image_url,
            rating: model.rating,
            feedback: model.feedback,
            created_at: model.created_at,
        }
    }
}

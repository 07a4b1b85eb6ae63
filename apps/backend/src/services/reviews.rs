use sea_orm::ConnectionTrait;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::roles::Role;
use crate::domain::reviews::{validate_feedback, validate_rating};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::reviews::{self, Review, ReviewCreate};
use crate::repos::users::{self, User};

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    pub delivery_man_id: Uuid,
    pub rating: i32,
    pub feedback: String,
}

/// `reviewer` rates a delivery man. The target must currently hold that role.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    reviewer: &User,
    input: ReviewInput,
) -> Result<Review, AppError> {
    let rating = validate_rating(input.rating)?;
    let feedback = validate_feedback(&input.feedback)?;

    let target = users::find_by_id(conn, input.delivery_man_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::User,
                format!("User {} not found", input.delivery_man_id),
            )
        })?;
    if target.role != Role::DeliveryMan {
        return Err(DomainError::conflict(
            ConflictKind::NotADeliveryMan,
            "Only delivery men can be reviewed",
        )
        .into());
    }

    Ok(reviews::create(
        conn,
        ReviewCreate {
            delivery_man_id: target.id,
            reviewer_email: reviewer.email.clone(),
            reviewer_name: reviewer.name.clone(),
            reviewer_image_url: reviewer.image_url.clone(),
            rating,
            feedback,
        },
    )
    .await?)
}

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn validate_rating(rating: i32) -> Result<i32, DomainError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidRating,
            format!("Rating must be between {MIN_RATING} and {MAX_RATING}"),
        ))
    }
}

pub fn validate_feedback(feedback: &str) -> Result<String, DomainError> {
    let trimmed = feedback.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other("Feedback".into()),
            "Feedback must not be empty",
        ));
    }
    Ok(trimmed.to_string())
}

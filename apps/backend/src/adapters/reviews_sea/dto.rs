//! DTOs for reviews_sea adapter.

#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub delivery_man_id: uuid::Uuid,
    pub reviewer_email: String,
    pub reviewer_name: String,
    pub reviewer_image_url: Option<String>,
    pub rating: i32,
    pub feedback: String,
}

//! DTOs for parcels_sea adapter.

/// DTO for booking a parcel. Price and status are decided by the caller.
#[derive(Debug, Clone)]
pub struct ParcelCreate {
    pub owner_email: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub parcel_type: String,
    pub weight_kg: f64,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub delivery_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub requested_delivery_date: String,
    pub price: f64,
}

/// DTO for editing a parcel's booking details.
#[derive(Debug, Clone)]
pub struct ParcelDetailsUpdate {
    pub owner_phone: String,
    pub parcel_type: String,
    pub weight_kg: f64,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub delivery_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub requested_delivery_date: String,
    pub price: f64,
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "on_the_way")]
    OnTheWay,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "returned")]
    Returned,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parcels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
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
    pub status: ParcelStatus,
    pub delivery_man_id: Option<Uuid>,
    pub approximate_delivery_date: Option<String>,
    pub booked_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::DeliveryManId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    DeliveryMan,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryMan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

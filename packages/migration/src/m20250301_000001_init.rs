use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Role,
    Phone,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Parcels {
    Table,
    Id,
    OwnerEmail,
    OwnerName,
    OwnerPhone,
    ParcelType,
    WeightKg,
    ReceiverName,
    ReceiverPhone,
    DeliveryAddress,
    Latitude,
    Longitude,
    RequestedDeliveryDate,
    Price,
    Status,
    DeliveryManId,
    ApproximateDeliveryDate,
    BookedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    DeliveryManId,
    ReviewerEmail,
    ReviewerName,
    ReviewerImageUrl,
    Rating,
    Feedback,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    // Roles are stored as text on every backend; the set is closed in code.
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("customer"),
                    )
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        // parcels
        manager
            .create_table(
                Table::create()
                    .table(Parcels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Parcels::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Parcels::OwnerEmail).string().not_null())
                    .col(ColumnDef::new(Parcels::OwnerName).string().not_null())
                    .col(ColumnDef::new(Parcels::OwnerPhone).string().not_null())
                    .col(ColumnDef::new(Parcels::ParcelType).string().not_null())
                    .col(ColumnDef::new(Parcels::WeightKg).double().not_null())
                    .col(ColumnDef::new(Parcels::ReceiverName).string().not_null())
                    .col(ColumnDef::new(Parcels::ReceiverPhone).string().not_null())
                    .col(ColumnDef::new(Parcels::DeliveryAddress).string().not_null())
                    .col(ColumnDef::new(Parcels::Latitude).double().not_null())
                    .col(ColumnDef::new(Parcels::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Parcels::RequestedDeliveryDate)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Parcels::Price).double().not_null())
                    .col(
                        ColumnDef::new(Parcels::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Parcels::DeliveryManId).uuid().null())
                    .col(
                        ColumnDef::new(Parcels::ApproximateDeliveryDate)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Parcels::BookedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Parcels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parcels_delivery_man_id")
                            .from(Parcels::Table, Parcels::DeliveryManId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parcels_owner_email")
                    .table(Parcels::Table)
                    .col(Parcels::OwnerEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parcels_delivery_man_id")
                    .table(Parcels::Table)
                    .col(Parcels::DeliveryManId)
                    .to_owned(),
            )
            .await?;

        // reviews
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::DeliveryManId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::ReviewerEmail).string().not_null())
                    .col(ColumnDef::new(Reviews::ReviewerName).string().not_null())
                    .col(ColumnDef::new(Reviews::ReviewerImageUrl).string().null())
                    .col(ColumnDef::new(Reviews::Rating).integer().not_null())
                    .col(ColumnDef::new(Reviews::Feedback).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_delivery_man_id")
                            .from(Reviews::Table, Reviews::DeliveryManId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_delivery_man_id")
                    .table(Reviews::Table)
                    .col(Reviews::DeliveryManId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parcels::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

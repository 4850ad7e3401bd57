use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // status is a short string rather than a native enum so the same
        // schema runs on the SQLite test database.
        manager
            .create_table(
                Table::create()
                    .table(Variants::Table)
                    .if_not_exists()
                    .col(pk_uuid(Variants::VariantId))
                    .col(uuid(Variants::ProductId))
                    .col(string_len(Variants::VariantName, 255))
                    .col(double(Variants::Price))
                    .col(string_len(Variants::Status, 32).default("ready"))
                    .col(integer(Variants::Quantity).default(0))
                    .col(
                        timestamp_with_time_zone(Variants::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Variants::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Variants::DeletedAt))
                    .col(uuid(Variants::CreatedBy))
                    .col(uuid_null(Variants::UpdatedBy))
                    .col(uuid_null(Variants::DeletedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_variants_product_id")
                            .from(Variants::Table, Variants::ProductId)
                            .to(Products::Table, Products::ProductId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_variants_product_id")
                    .table(Variants::Table)
                    .col(Variants::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Variants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Variants {
    Table,
    VariantId,
    ProductId,
    VariantName,
    Price,
    Status,
    Quantity,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    CreatedBy,
    UpdatedBy,
    DeletedBy,
}

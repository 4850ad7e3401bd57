use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000002_create_variants::Variants;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(pk_uuid(Images::ImageId))
                    .col(uuid(Images::VariantId))
                    .col(text(Images::ImageUrl))
                    .col(integer(Images::Position).default(0))
                    .col(
                        timestamp_with_time_zone(Images::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Images::UpdatedAt))
                    .col(uuid(Images::CreatedBy))
                    .col(uuid_null(Images::UpdatedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_variant_id")
                            .from(Images::Table, Images::VariantId)
                            .to(Variants::Table, Variants::VariantId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_images_variant_id_position")
                    .table(Images::Table)
                    .col(Images::VariantId)
                    .col(Images::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Images {
    Table,
    ImageId,
    VariantId,
    ImageUrl,
    Position,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Materials::Table)
                    .if_not_exists()
                    .col(pk_uuid(Materials::MaterialId))
                    .col(string_len(Materials::Title, 255))
                    .col(text(Materials::Description).default(""))
                    .col(
                        timestamp_with_time_zone(Materials::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Materials::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_materials_created_at")
                    .table(Materials::Table)
                    .col(Materials::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Materials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Materials {
    Table,
    MaterialId,
    Title,
    Description,
    CreatedAt,
    UpdatedAt,
}

//! Create pvz table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pvz::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pvz::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Pvz::RegistrationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pvz::City).string_len(32).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pvz_registration_date")
                    .table(Pvz::Table)
                    .col(Pvz::RegistrationDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pvz::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Pvz {
    Table,
    Id,
    RegistrationDate,
    City,
}

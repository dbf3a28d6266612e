//! Create products table

use sea_orm_migration::prelude::*;

use super::m20250401_000002_create_receptions::Receptions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Products::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::Type).string_len(32).not_null())
                    .col(ColumnDef::new(Products::ReceptionId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_reception")
                            .from(Products::Table, Products::ReceptionId)
                            .to(Receptions::Table, Receptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_reception_date_time")
                    .table(Products::Table)
                    .col(Products::ReceptionId)
                    .col(Products::DateTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Products {
    Table,
    Id,
    DateTime,
    Type,
    ReceptionId,
}

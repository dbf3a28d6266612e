//! Create receptions table
//!
//! At most one reception per pickup point may be `in_progress`. The partial
//! unique index is written as raw SQL since both Postgres and SQLite accept
//! the same statement.

use sea_orm_migration::prelude::*;

use super::m20250401_000001_create_pvz::Pvz;
use crate::shared::OPEN_RECEPTION_INDEX;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Receptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Receptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Receptions::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Receptions::PvzId).uuid().not_null())
                    .col(
                        ColumnDef::new(Receptions::Status)
                            .string_len(20)
                            .not_null()
                            .default("in_progress"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receptions_pvz")
                            .from(Receptions::Table, Receptions::PvzId)
                            .to(Pvz::Table, Pvz::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receptions_pvz_date_time")
                    .table(Receptions::Table)
                    .col(Receptions::PvzId)
                    .col(Receptions::DateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON receptions (pvz_id) WHERE status = 'in_progress'",
                OPEN_RECEPTION_INDEX
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Receptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Receptions {
    Table,
    Id,
    DateTime,
    PvzId,
    Status,
}

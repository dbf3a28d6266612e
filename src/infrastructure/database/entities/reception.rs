//! Reception entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored reception status
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReceptionStatus {
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "close")]
    Close,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub date_time: DateTimeUtc,

    pub pvz_id: Uuid,

    pub status: ReceptionStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pvz::Entity",
        from = "Column::PvzId",
        to = "super::pvz::Column::Id"
    )]
    Pvz,
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::pvz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pvz.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Product entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// UUIDv7, so ordering by id follows insertion order
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub date_time: DateTimeUtc,

    /// Product type name (электроника, одежда, обувь)
    #[sea_orm(column_name = "type")]
    pub product_type: String,

    pub reception_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reception::Entity",
        from = "Column::ReceptionId",
        to = "super::reception::Column::Id"
    )]
    Reception,
}

impl Related<super::reception::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reception.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

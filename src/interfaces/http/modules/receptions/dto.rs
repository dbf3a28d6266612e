//! Reception DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Reception, ReceptionWithProducts};
use crate::interfaces::http::modules::products::ProductDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionRequest {
    pub pvz_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionDto {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub pvz_id: Uuid,
    /// `in_progress` or `close`
    pub status: String,
}

impl From<Reception> for ReceptionDto {
    fn from(r: Reception) -> Self {
        Self {
            id: r.id,
            date_time: r.date_time,
            pvz_id: r.pvz_id,
            status: r.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceptionWithProductsDto {
    pub reception: ReceptionDto,
    pub products: Vec<ProductDto>,
}

impl From<ReceptionWithProducts> for ReceptionWithProductsDto {
    fn from(r: ReceptionWithProducts) -> Self {
        Self {
            reception: r.reception.into(),
            products: r.products.into_iter().map(ProductDto::from).collect(),
        }
    }
}

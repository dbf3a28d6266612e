//! Product DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Product;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    /// `электроника`, `одежда` or `обувь`
    #[serde(rename = "type", default)]
    pub product_type: String,
    pub pvz_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub reception_id: Uuid,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            date_time: p.date_time,
            product_type: p.product_type.as_str().to_string(),
            reception_id: p.reception_id,
        }
    }
}

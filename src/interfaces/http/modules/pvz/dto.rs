//! Pickup point DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{PickupPoint, PickupPointWithReceptions};
use crate::interfaces::http::modules::receptions::ReceptionWithProductsDto;
use crate::shared::{PaginatedResult, MAX_PAGE_LIMIT};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePvzRequest {
    /// `Москва`, `Санкт-Петербург` or `Казань`
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PvzDto {
    pub id: Uuid,
    pub registration_date: DateTime<Utc>,
    pub city: String,
}

impl From<PickupPoint> for PvzDto {
    fn from(p: PickupPoint) -> Self {
        Self {
            id: p.id,
            registration_date: p.registration_date,
            city: p.city.as_str().to_string(),
        }
    }
}

/// Query parameters for `GET /pvz`. Dates are RFC 3339.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PvzListQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// 1-based page number
    pub page: Option<u64>,
    /// Page size, 1 to 30
    pub limit: Option<u64>,
}

impl PvzListQuery {
    /// Explicit values must be in range; absent ones take the defaults.
    pub fn is_valid(&self) -> bool {
        if matches!(self.page, Some(0)) {
            return false;
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return false;
            }
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PvzWithReceptionsDto {
    pub pvz: PvzDto,
    pub receptions: Vec<ReceptionWithProductsDto>,
}

impl From<PickupPointWithReceptions> for PvzWithReceptionsDto {
    fn from(p: PickupPointWithReceptions) -> Self {
        Self {
            pvz: p.pvz.into(),
            receptions: p
                .receptions
                .into_iter()
                .map(ReceptionWithProductsDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PvzListResponse {
    pub items: Vec<PvzWithReceptionsDto>,
    pub total_count: u64,
    pub page: u64,
    pub limit: u64,
}

impl From<PaginatedResult<PickupPointWithReceptions>> for PvzListResponse {
    fn from(page: PaginatedResult<PickupPointWithReceptions>) -> Self {
        Self {
            items: page.items.into_iter().map(PvzWithReceptionsDto::from).collect(),
            total_count: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn empty_query_is_valid() {
        assert!(PvzListQuery::default().is_valid());
    }

    #[test]
    fn out_of_range_paging_is_rejected() {
        let zero_page = PvzListQuery {
            page: Some(0),
            ..Default::default()
        };
        let big_limit = PvzListQuery {
            limit: Some(31),
            ..Default::default()
        };
        assert!(!zero_page.is_valid());
        assert!(!big_limit.is_valid());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let now = Utc::now();
        let query = PvzListQuery {
            start_date: Some(now),
            end_date: Some(now - Duration::days(1)),
            ..Default::default()
        };
        assert!(!query.is_valid());
    }
}

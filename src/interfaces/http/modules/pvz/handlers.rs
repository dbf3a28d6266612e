//! Pickup point API handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::dto::{CreatePvzRequest, PvzDto, PvzListQuery, PvzListResponse};
use crate::application::PvzService;
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorResponse, ValidatedJson};
use crate::shared::PvzFilter;

#[derive(Clone)]
pub struct PvzHandlerState {
    pub pvz: PvzService,
}

#[utoipa::path(
    post,
    path = "/pvz",
    tag = "Pickup Points",
    request_body = CreatePvzRequest,
    responses(
        (status = 201, description = "Pickup point created", body = PvzDto),
        (status = 400, description = "City not supported", body = ErrorResponse),
        (status = 403, description = "Moderators only", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_pvz(
    State(state): State<PvzHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePvzRequest>,
) -> ApiResult<(StatusCode, Json<PvzDto>)> {
    let pvz = state.pvz.create_pvz(&request.city).await?;
    Ok((StatusCode::CREATED, Json(pvz.into())))
}

#[utoipa::path(
    get,
    path = "/pvz",
    tag = "Pickup Points",
    params(PvzListQuery),
    responses(
        (status = 200, description = "Pickup points with receptions and products", body = PvzListResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pvz(
    State(state): State<PvzHandlerState>,
    query: Result<Query<PvzListQuery>, QueryRejection>,
) -> ApiResult<Json<PvzListResponse>> {
    let Query(query) = query.map_err(|e| {
        debug!(error = %e, "Rejected pickup point query");
        ApiError::bad_request("Invalid query parameters")
    })?;
    if !query.is_valid() {
        return Err(ApiError::bad_request("Invalid query parameters"));
    }

    let filter = PvzFilter::new(query.start_date, query.end_date, query.page, query.limit);
    let page = state.pvz.list_pvz_with_receptions(&filter).await?;
    Ok(Json(page.into()))
}

//! Reception API handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{CreateReceptionRequest, ReceptionDto};
use crate::application::ReceptionService;
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorResponse, ValidatedJson};

#[derive(Clone)]
pub struct ReceptionHandlerState {
    pub receptions: ReceptionService,
}

#[utoipa::path(
    post,
    path = "/receptions",
    tag = "Receptions",
    request_body = CreateReceptionRequest,
    responses(
        (status = 201, description = "Reception opened", body = ReceptionDto),
        (status = 400, description = "Previous reception is still open", body = ErrorResponse),
        (status = 403, description = "Employees only", body = ErrorResponse),
        (status = 404, description = "Pickup point not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_reception(
    State(state): State<ReceptionHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateReceptionRequest>,
) -> ApiResult<(StatusCode, Json<ReceptionDto>)> {
    let reception = state.receptions.create_reception(request.pvz_id).await?;
    Ok((StatusCode::CREATED, Json(reception.into())))
}

#[utoipa::path(
    post,
    path = "/pvz/{pvzId}/close_last_reception",
    tag = "Receptions",
    params(("pvzId" = Uuid, Path, description = "Pickup point id")),
    responses(
        (status = 200, description = "Reception closed", body = ReceptionDto),
        (status = 400, description = "No open reception", body = ErrorResponse),
        (status = 403, description = "Employees only", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn close_last_reception(
    State(state): State<ReceptionHandlerState>,
    pvz_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ReceptionDto>> {
    let Path(pvz_id) = pvz_id.map_err(|_| ApiError::bad_request("Invalid pickup point id"))?;
    let closed = state.receptions.close_last_reception(pvz_id).await?;
    Ok(Json(closed.reception.into()))
}

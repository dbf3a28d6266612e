//! Product API handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use super::dto::{AddProductRequest, ProductDto};
use crate::application::ProductService;
use crate::interfaces::http::common::{
    ApiError, ApiResult, ErrorResponse, MessageResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct ProductHandlerState {
    pub products: ProductService,
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = AddProductRequest,
    responses(
        (status = 201, description = "Product added to the open reception", body = ProductDto),
        (status = 400, description = "Invalid type or no open reception", body = ErrorResponse),
        (status = 403, description = "Employees only", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_product(
    State(state): State<ProductHandlerState>,
    ValidatedJson(request): ValidatedJson<AddProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let product = state
        .products
        .add_product(&request.product_type, request.pvz_id)
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    post,
    path = "/pvz/{pvzId}/delete_last_product",
    tag = "Products",
    params(("pvzId" = Uuid, Path, description = "Pickup point id")),
    responses(
        (status = 200, description = "Last product deleted", body = MessageResponse),
        (status = 400, description = "No open reception or nothing to delete", body = ErrorResponse),
        (status = 403, description = "Employees only", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_last_product(
    State(state): State<ProductHandlerState>,
    pvz_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(pvz_id) = pvz_id.map_err(|_| ApiError::bad_request("Invalid pickup point id"))?;
    let removed = state.products.delete_last_product(pvz_id).await?;
    debug!(product_id = %removed.id, "Last product removed via API");
    Ok(Json(MessageResponse {
        message: "Last product deleted successfully".to_string(),
    }))
}

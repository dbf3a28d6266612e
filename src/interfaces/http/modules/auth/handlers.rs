//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{DummyLoginRequest, LoginRequest, RegisterRequest, UserDto};
use crate::application::IdentityService;
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: IdentityService,
}

#[utoipa::path(
    post,
    path = "/dummyLogin",
    tag = "Authentication",
    request_body = DummyLoginRequest,
    responses(
        (status = 200, description = "JWT for the requested role", body = String),
        (status = 400, description = "Unknown role", body = ErrorResponse)
    )
)]
pub async fn dummy_login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<DummyLoginRequest>,
) -> ApiResult<Json<String>> {
    let auth = state.identity.dummy_login(&request.role)?;
    Ok(Json(auth.token))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    let user = state
        .identity
        .register(&request.email, &request.password, &request.role)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = String),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<String>> {
    let auth = state.identity.login(&request.email, &request.password).await?;
    Ok(Json(auth.token))
}

//! Mapping from domain errors to HTTP responses
//!
//! The services return `DomainError`; this module alone decides the status
//! code and the user-facing message for each kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::shared::DomainError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

fn status_and_message(err: &DomainError) -> (StatusCode, String) {
    let (status, message) = match err {
        DomainError::MissingField("city") => (
            StatusCode::BAD_REQUEST,
            "City is required to create a pickup point.",
        ),
        DomainError::MissingField("type") => (StatusCode::BAD_REQUEST, "Product type is required."),
        DomainError::MissingField("email") => (
            StatusCode::BAD_REQUEST,
            "Email is required for registration.",
        ),
        DomainError::MissingField("password") => (
            StatusCode::BAD_REQUEST,
            "Password is required for registration.",
        ),
        DomainError::MissingField(field) => {
            return (StatusCode::BAD_REQUEST, format!("Field '{}' is required.", field))
        }
        DomainError::InvalidCity(_) => (
            StatusCode::BAD_REQUEST,
            "Pickup points can only be created in the following cities: Москва, Санкт-Петербург, Казань.",
        ),
        DomainError::InvalidProductType(_) => (
            StatusCode::BAD_REQUEST,
            "Invalid product type specified. Available types: электроника, одежда, обувь.",
        ),
        DomainError::InvalidRole(_) => (
            StatusCode::BAD_REQUEST,
            "Invalid role specified. Available roles: employee, moderator.",
        ),
        DomainError::Validation(msg) => return (StatusCode::BAD_REQUEST, msg.clone()),
        DomainError::NotFound { entity, .. } => {
            return (StatusCode::NOT_FOUND, format!("{} not found.", entity))
        }
        DomainError::Conflict(msg) => return (StatusCode::CONFLICT, msg.clone()),
        DomainError::ActiveReceptionExists { .. } => (
            StatusCode::BAD_REQUEST,
            "Cannot create a new reception while the previous one is not closed.",
        ),
        DomainError::NoActiveReception { .. } => (
            StatusCode::BAD_REQUEST,
            "No active reception for this pickup point.",
        ),
        DomainError::AlreadyClosed { .. } => {
            (StatusCode::BAD_REQUEST, "This reception is already closed.")
        }
        DomainError::ReceptionCannotBeModified { .. } => {
            (StatusCode::BAD_REQUEST, "Closed reception cannot be modified.")
        }
        DomainError::NoProductsToDelete { .. } => (
            StatusCode::BAD_REQUEST,
            "No products to delete in the current reception.",
        ),
        DomainError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "Invalid email or password. Please check your credentials.",
        ),
        DomainError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    };
    (status, message.to_string())
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.is_storage() {
            error!(error = %err, "Request failed on storage");
        }
        let (status, message) = status_and_message(&err);
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::InfraError;
    use uuid::Uuid;

    #[test]
    fn business_rules_map_to_bad_request() {
        let err: ApiError = DomainError::NoProductsToDelete {
            reception_id: Uuid::nil(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "No products to delete in the current reception.");
    }

    #[test]
    fn not_found_and_conflict() {
        let err: ApiError = DomainError::not_found("Pickup point", "id", Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = DomainError::Conflict("User with this email already exists".into()).into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn storage_errors_hide_details() {
        let err: ApiError = DomainError::Storage(InfraError::Crypto("secret detail".into())).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("secret"));
    }
}

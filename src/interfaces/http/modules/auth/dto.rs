//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::User;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DummyLoginRequest {
    /// `employee` or `moderator`
    #[serde(default)]
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

/// Missing fields deserialize to empty strings so the identity service
/// reports which one is absent.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "email is too long"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

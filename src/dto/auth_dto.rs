use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{UserResponse, UserRole};
use crate::utils::validation::validate_not_blank;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub expire_at: i64,
}

// Alta de usuario (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(
        custom = "validate_not_blank",
        length(max = 255, message = "username is too long")
    )]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub full_name: String,
    pub role: UserRole,
}

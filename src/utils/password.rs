//! Hash y verificación de contraseñas con bcrypt

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(format!("error hashing password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash)
        .map_err(|e| AppError::Hash(format!("error verifying password: {}", e)))
}

//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de roles de los usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_bearer_token, JwtClaims},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

impl From<JwtClaims> for AuthenticatedUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Verifica que el rol del usuario esté entre los permitidos
pub fn authorize(user: &AuthenticatedUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if allowed_roles.contains(&user.role) {
        Ok(())
    } else {
        Err(forbidden_error(
            "access this resource",
            &format!("role '{}' is not permitted", user.role),
        ))
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("authorization token required".to_string()))?;

    let token = extract_bearer_token(auth_header)?;
    let claims = state.jwt.verify(token)?;

    // Inyectar usuario autenticado en las extensions
    request
        .extensions_mut()
        .insert(AuthenticatedUser::from(claims));

    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&user, &[UserRole::Admin])?;
    Ok(next.run(request).await)
}

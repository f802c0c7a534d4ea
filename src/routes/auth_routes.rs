use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{CreateUserRequest, LoginRequest, LoginResponse};
use crate::middleware::auth::{admin_only_middleware, AuthenticatedUser};
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas sin autenticación
pub fn create_public_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Rutas que requieren un token válido
pub fn create_user_router() -> Router<AppState> {
    Router::new().route("/me", get(me)).route(
        "/users",
        get(list_users)
            .post(create_user)
            .route_layer(middleware::from_fn(admin_only_middleware)),
    )
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.pool.clone(), state.jwt.clone())
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = controller(&state).login(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let profile = controller(&state).me(user.user_id).await?;
    Ok(Json(profile))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = controller(&state).list_users().await?;
    Ok(Json(users))
}

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = controller(&state).create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

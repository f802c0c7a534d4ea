//! Controlador de autenticación y usuarios
//!
//! Login con usuario y contraseña, perfil del usuario actual y
//! administración de usuarios (solo admin, verificado en la ruta).

use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{CreateUserRequest, LoginRequest, LoginResponse};
use crate::models::user::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};
use crate::utils::jwt::JwtService;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "invalid credentials";

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtService,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtService) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;
        let username = request.username.trim();

        let Some(user) = self.repository.find_by_username(username).await? else {
            warn!("❌ Login fallido: usuario '{}' no existe", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&request.password, &user.password_hash)? {
            warn!("❌ Login fallido: contraseña incorrecta para '{}'", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let issued = self.jwt.issue(&user)?;
        info!("✅ Login exitoso para '{}' ({})", user.username, user.role);

        Ok(LoginResponse {
            token: issued.token,
            user: UserResponse::from(user),
            expire_at: issued.expire_at,
        })
    }

    pub async fn me(&self, user_id: i64) -> AppResult<UserResponse> {
        self.repository
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| not_found_error("user", user_id))
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;
        let username = request.username.trim();

        if self.repository.find_by_username(username).await?.is_some() {
            return Err(conflict_error("user", "username", username));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .repository
            .create(username, &password_hash, request.full_name.trim(), request.role)
            .await?;

        info!("👤 Usuario '{}' creado con rol {}", user.username, user.role);
        Ok(UserResponse::from(user))
    }
}

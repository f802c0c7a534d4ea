//! Utilidades JWT
//!
//! Emisión y verificación de tokens HS256 firmados con el secreto
//! de la configuración. Los claims llevan id, usuario y rol.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::environment::EnvironmentConfig,
    models::user::{User, UserRole},
    utils::errors::AppError,
};

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Token emitido junto con su vencimiento (epoch en segundos)
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expire_at: i64,
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: Duration,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: Duration::seconds(config.jwt_expiration as i64),
        }
    }
}

/// Servicio JWT
#[derive(Clone)]
pub struct JwtService {
    expiration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            expiration: config.expiration,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Genera un token de acceso para el usuario
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        self.issue_at(user, Utc::now())
    }

    /// Genera un token tomando `now` como instante de emisión
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<IssuedToken, AppError> {
        let expire_at = (now + self.expiration).timestamp();
        let claims = JwtClaims {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            exp: expire_at,
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("error generating token: {}", e)))?;

        Ok(IssuedToken { token, expire_at })
    }

    /// Valida firma y vencimiento, y decodifica los claims
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))
    }
}

/// Extraer token del header Authorization
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("authorization header must start with 'Bearer '".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("token cannot be empty".to_string()));
    }

    Ok(token)
}

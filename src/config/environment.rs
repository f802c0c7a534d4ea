//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

/// Secreto usado solo fuera de producción cuando JWT_SECRET no está definido
const DEV_JWT_SECRET: &str = "tractor-agency-dev-secret-change-in-production";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub seed_default_users: bool,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => bail!("JWT_SECRET must be set in production"),
            _ => DEV_JWT_SECRET.to_string(),
        };

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set in environment variables")?,
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 24 * 60 * 60)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            seed_default_users: parse_var("SEED_DEFAULT_USERS", true)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 20)?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", 1)?,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("{} must be a valid value ('{}'): {}", name, raw, e))
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u16>("PORT", " 9090 ").unwrap(), 9090);
        assert!(parse_value::<bool>("SEED_DEFAULT_USERS", "false").is_ok());

        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins("http://localhost:3000, https://agency.example.com,,"),
            vec!["http://localhost:3000".to_string(), "https://agency.example.com".to_string()]
        );
    }
}

//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado mutable en proceso:
//! todo vive en PostgreSQL.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::utils::jwt::{JwtConfig, JwtService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let jwt = JwtService::new(&JwtConfig::from(&config));
        Self {
            pool,
            config: Arc::new(config),
            jwt,
        }
    }
}

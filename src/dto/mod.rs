//! Data Transfer Objects
//!
//! Formas de entrada (requests y filtros de query string) de la API.

pub mod auth_dto;
pub mod expense_dto;
pub mod lookup_dto;
pub mod part_dto;
pub mod report_dto;
pub mod service_dto;
pub mod tractor_dto;

use serde::{Deserialize, Serialize};

/// Respuesta simple con un mensaje
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

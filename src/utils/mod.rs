//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y contraseñas.

pub mod errors;
pub mod jwt;
pub mod password;
pub mod validation;

//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL de la agencia.

pub mod expense;
pub mod lookup;
pub mod report;
pub mod service_record;
pub mod spare_part;
pub mod tractor;
pub mod transaction;
pub mod user;

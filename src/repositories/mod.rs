//! Repositorios de acceso a datos
//!
//! Consultas parametrizadas de SQLx, una estructura por tabla.

pub mod expense_repository;
pub mod lookup_repository;
pub mod part_repository;
pub mod service_repository;
pub mod tractor_repository;
pub mod transaction_repository;
pub mod user_repository;

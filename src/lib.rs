//! Backend de gestión para una agencia de tractores
//!
//! Inventario de tractores y repuestos, registros de servicio, gastos
//! y reportes de ganancias sobre PostgreSQL, expuestos como API REST.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;

//! Controladores
//!
//! Lógica de negocio entre las rutas HTTP y los repositorios.

pub mod auth_controller;
pub mod expense_controller;
pub mod lookup_controller;
pub mod part_controller;
pub mod report_controller;
pub mod service_controller;
pub mod tractor_controller;

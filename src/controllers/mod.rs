//! Controllers del sistema
//!
//! Reglas de negocio por recurso; los handlers de rutas delegan acá.

pub mod auth_controller;
pub mod catalog_controller;
pub mod checklist_controller;
pub mod reservation_controller;
pub mod user_controller;
pub mod vehicle_controller;

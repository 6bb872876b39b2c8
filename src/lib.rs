//! Backend de alquiler de autos
//!
//! API REST: catálogo de vehículos, cuentas de usuario, reservas con
//! pricing y disponibilidad, checklists de condición, y un cliente con
//! fallback a espejo local.

pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad, cada uno dueño de su SQL.

pub mod catalog_repository;
pub mod checklist_repository;
pub mod reservation_repository;
pub mod user_repository;
pub mod vehicle_repository;

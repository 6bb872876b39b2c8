//! DTOs de la API
//!
//! Requests y responses que no mapean directamente a un modelo.

pub mod auth_dto;
pub mod common;
pub mod reservation_dto;

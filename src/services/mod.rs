//! Servicios del sistema
//!
//! Lógica de negocio pura: pricing, disponibilidad y facturación.

pub mod availability_service;
pub mod invoice_service;
pub mod pricing_service;

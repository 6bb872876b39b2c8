//! Middleware del sistema
//!
//! Autenticación JWT, gate de admin y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;

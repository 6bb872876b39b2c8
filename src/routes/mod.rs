//! Rutas de la API
//!
//! Un router por recurso; el ensamblado con los prefijos `/api/...`
//! vive en `create_app_router`.

pub mod auth_routes;
pub mod catalog_routes;
pub mod checklist_routes;
pub mod reservation_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::Router;

use crate::state::AppState;

/// Ensamblar el router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/autos", vehicle_routes::create_vehicle_router(state.clone()))
        .nest("/api/catalogo", catalog_routes::create_catalog_router())
        .nest("/api/usuarios", user_routes::create_user_router(state.clone()))
        .nest(
            "/api/reservas",
            reservation_routes::create_reservation_router(state.clone()),
        )
        .nest(
            "/api/checklist",
            checklist_routes::create_checklist_router(state.clone()),
        )
        .with_state(state)
}

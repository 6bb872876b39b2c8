use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::common::ApiResponse;
use crate::dto::reservation_dto::{
    AvailabilityResponse, CreateReservationRequest, InvoiceResponse, QuoteRequest,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::reservation::Reservation;
use crate::services::pricing_service::PriceBreakdown;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router(state: AppState) -> Router<AppState> {
    // La cotización y la disponibilidad son públicas; el resto requiere sesión
    let public = Router::new()
        .route("/calcular-precio", post(quote_price))
        .route("/disponibilidad", get(check_availability));

    let protected = Router::new()
        .route("/", post(create_reservation))
        .route("/", get(list_reservations))
        .route("/:id", get(get_reservation))
        .route("/:id/cancelar", put(cancel_reservation))
        .route("/:id/factura", get(get_invoice))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn quote_price(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<ApiResponse<PriceBreakdown>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let breakdown = controller.quote(request).await?;
    Ok(Json(ApiResponse::success(breakdown)))
}

async fn check_availability(
    State(state): State<AppState>,
    Query(request): Query<QuoteRequest>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let disponibilidad = controller.availability(request).await?;
    Ok(Json(ApiResponse::success(disponibilidad)))
}

async fn create_reservation(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.create(&actor, request).await?;
    Ok(Json(response))
}

async fn list_reservations(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let reservas = controller.list(&actor).await?;
    Ok(Json(ApiResponse::success(reservas)))
}

async fn get_reservation(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let reserva = controller.get_by_id(id, &actor).await?;
    Ok(Json(ApiResponse::success(reserva)))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.cancel(id, &actor).await?;
    Ok(Json(response))
}

async fn get_invoice(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let factura = controller.invoice(id, &actor).await?;
    Ok(Json(ApiResponse::success(factura)))
}

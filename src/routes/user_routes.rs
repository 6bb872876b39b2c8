use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::common::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::models::user::{RegisterRequest, UpdateUserRequest, UserResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    // Perfil propio o admin
    let protected = Router::new()
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Alta, listado y borrado solo admin
    let admin = Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", delete(delete_user))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    protected.merge(admin)
}

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let users = controller.list().await?;
    Ok(Json(ApiResponse::success(users)))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let user = controller.get_by_id(id, &actor).await?;
    Ok(Json(ApiResponse::success(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update(id, &actor, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message_only(
        "Usuario eliminado exitosamente".to_string(),
    )))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::service_controller::ServiceController;
use crate::dto::service_dto::{CreateServiceRequest, ServiceFilters, UpdateServiceRequest};
use crate::dto::MessageResponse;
use crate::models::service_record::ServiceRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/:id", get(get_service).put(update_service).delete(delete_service))
}

async fn list_services(
    State(state): State<AppState>,
    Query(filters): Query<ServiceFilters>,
) -> Result<Json<Vec<ServiceRecord>>, AppError> {
    let services = ServiceController::new(state.pool.clone()).list(filters).await?;
    Ok(Json(services))
}

async fn create_service(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceRecord>), AppError> {
    let record = ServiceController::new(state.pool.clone()).create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ServiceRecord>, AppError> {
    let record = ServiceController::new(state.pool.clone()).get(id).await?;
    Ok(Json(record))
}

async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceRecord>, AppError> {
    let record = ServiceController::new(state.pool.clone()).update(id, request).await?;
    Ok(Json(record))
}

async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ServiceController::new(state.pool.clone()).delete(id).await?;
    Ok(Json(MessageResponse::new("service record deleted successfully")))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::lookup_controller::LookupController;
use crate::controllers::part_controller::PartController;
use crate::dto::lookup_dto::{CreatePartNameRequest, NameRequest, PartNameFilters};
use crate::dto::part_dto::{CreatePartRequest, PartFilters, SellPartRequest, UpdatePartRequest};
use crate::dto::MessageResponse;
use crate::models::lookup::{PartCategory, PartName};
use crate::models::spare_part::{SellPartResult, SparePart};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_part_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_parts).post(create_part))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", put(rename_category).delete(delete_category))
        .route("/names", get(list_part_names).post(create_part_name))
        .route("/names/:id", put(rename_part_name).delete(delete_part_name))
        .route("/:id", get(get_part).put(update_part).delete(delete_part))
        .route("/:id/sell", post(sell_part))
}

async fn list_parts(
    State(state): State<AppState>,
    Query(filters): Query<PartFilters>,
) -> Result<Json<Vec<SparePart>>, AppError> {
    let parts = PartController::new(state.pool.clone()).list(filters).await?;
    Ok(Json(parts))
}

async fn create_part(
    State(state): State<AppState>,
    Json(request): Json<CreatePartRequest>,
) -> Result<(StatusCode, Json<SparePart>), AppError> {
    let part = PartController::new(state.pool.clone()).create(request).await?;
    Ok((StatusCode::CREATED, Json(part)))
}

async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SparePart>, AppError> {
    let part = PartController::new(state.pool.clone()).get(id).await?;
    Ok(Json(part))
}

async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePartRequest>,
) -> Result<Json<SparePart>, AppError> {
    let part = PartController::new(state.pool.clone()).update(id, request).await?;
    Ok(Json(part))
}

async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    PartController::new(state.pool.clone()).delete(id).await?;
    Ok(Json(MessageResponse::new("part deleted successfully")))
}

async fn sell_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SellPartRequest>,
) -> Result<Json<SellPartResult>, AppError> {
    let result = PartController::new(state.pool.clone()).sell(id, request).await?;
    Ok(Json(result))
}

// ---- Categorías y nombres ----

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<PartCategory>>, AppError> {
    let categories = LookupController::new(state.pool.clone()).list_categories().await?;
    Ok(Json(categories))
}

async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> Result<(StatusCode, Json<PartCategory>), AppError> {
    let created = LookupController::new(state.pool.clone()).create_category(request).await?;
    let status = if created.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(created.value)))
}

async fn rename_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<NameRequest>,
) -> Result<Json<PartCategory>, AppError> {
    let category = LookupController::new(state.pool.clone()).rename_category(id, request).await?;
    Ok(Json(category))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    LookupController::new(state.pool.clone()).delete_category(id).await?;
    Ok(Json(MessageResponse::new("category deleted successfully")))
}

async fn list_part_names(
    State(state): State<AppState>,
    Query(filters): Query<PartNameFilters>,
) -> Result<Json<Vec<PartName>>, AppError> {
    let names = LookupController::new(state.pool.clone()).list_part_names(filters).await?;
    Ok(Json(names))
}

async fn create_part_name(
    State(state): State<AppState>,
    Json(request): Json<CreatePartNameRequest>,
) -> Result<(StatusCode, Json<PartName>), AppError> {
    let name = LookupController::new(state.pool.clone()).create_part_name(request).await?;
    Ok((StatusCode::CREATED, Json(name)))
}

async fn rename_part_name(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<NameRequest>,
) -> Result<Json<PartName>, AppError> {
    let name = LookupController::new(state.pool.clone()).rename_part_name(id, request).await?;
    Ok(Json(name))
}

async fn delete_part_name(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    LookupController::new(state.pool.clone()).delete_part_name(id).await?;
    Ok(Json(MessageResponse::new("part name deleted successfully")))
}

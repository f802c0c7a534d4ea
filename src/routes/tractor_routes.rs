use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::lookup_controller::LookupController;
use crate::controllers::tractor_controller::TractorController;
use crate::dto::lookup_dto::{CreateTractorModelRequest, ModelFilters, NameRequest};
use crate::dto::tractor_dto::{
    CreateTractorRequest, SellTractorRequest, TractorFilters, UpdateTractorRequest,
};
use crate::dto::MessageResponse;
use crate::models::lookup::{TractorBrand, TractorModel};
use crate::models::tractor::{SellTractorResult, Tractor, TractorDetail, TractorWithExchange};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tractor_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tractors).post(create_tractor))
        .route("/brands", get(list_brands).post(create_brand))
        .route("/brands/:id", put(rename_brand).delete(delete_brand))
        .route("/models", get(list_models).post(create_model))
        .route("/models/:id", put(rename_model).delete(delete_model))
        .route("/:id", get(get_tractor).put(update_tractor).delete(delete_tractor))
        .route("/:id/sell", post(sell_tractor))
}

async fn list_tractors(
    State(state): State<AppState>,
    Query(filters): Query<TractorFilters>,
) -> Result<Json<Vec<TractorWithExchange>>, AppError> {
    let controller = TractorController::new(state.pool.clone());
    let tractors = controller.list(filters).await?;
    Ok(Json(tractors))
}

async fn create_tractor(
    State(state): State<AppState>,
    Json(request): Json<CreateTractorRequest>,
) -> Result<(StatusCode, Json<Tractor>), AppError> {
    let controller = TractorController::new(state.pool.clone());
    let tractor = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(tractor)))
}

async fn get_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TractorDetail>, AppError> {
    let controller = TractorController::new(state.pool.clone());
    let tractor = controller.get(id).await?;
    Ok(Json(tractor))
}

async fn update_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTractorRequest>,
) -> Result<Json<Tractor>, AppError> {
    let controller = TractorController::new(state.pool.clone());
    let tractor = controller.update(id, request).await?;
    Ok(Json(tractor))
}

async fn delete_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = TractorController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("tractor deleted successfully")))
}

async fn sell_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SellTractorRequest>,
) -> Result<Json<SellTractorResult>, AppError> {
    let controller = TractorController::new(state.pool.clone());
    let result = controller.sell(id, request).await?;
    Ok(Json(result))
}

// ---- Marcas y modelos ----

async fn list_brands(State(state): State<AppState>) -> Result<Json<Vec<TractorBrand>>, AppError> {
    let brands = LookupController::new(state.pool.clone()).list_brands().await?;
    Ok(Json(brands))
}

async fn create_brand(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> Result<(StatusCode, Json<TractorBrand>), AppError> {
    let created = LookupController::new(state.pool.clone()).create_brand(request).await?;
    let status = if created.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(created.value)))
}

async fn rename_brand(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<NameRequest>,
) -> Result<Json<TractorBrand>, AppError> {
    let brand = LookupController::new(state.pool.clone()).rename_brand(id, request).await?;
    Ok(Json(brand))
}

async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    LookupController::new(state.pool.clone()).delete_brand(id).await?;
    Ok(Json(MessageResponse::new("brand deleted successfully")))
}

async fn list_models(
    State(state): State<AppState>,
    Query(filters): Query<ModelFilters>,
) -> Result<Json<Vec<TractorModel>>, AppError> {
    let models = LookupController::new(state.pool.clone()).list_models(filters).await?;
    Ok(Json(models))
}

async fn create_model(
    State(state): State<AppState>,
    Json(request): Json<CreateTractorModelRequest>,
) -> Result<(StatusCode, Json<TractorModel>), AppError> {
    let model = LookupController::new(state.pool.clone()).create_model(request).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

async fn rename_model(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<NameRequest>,
) -> Result<Json<TractorModel>, AppError> {
    let model = LookupController::new(state.pool.clone()).rename_model(id, request).await?;
    Ok(Json(model))
}

async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    LookupController::new(state.pool.clone()).delete_model(id).await?;
    Ok(Json(MessageResponse::new("model deleted successfully")))
}

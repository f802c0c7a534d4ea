use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Json, Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::TransactionFilters;
use crate::middleware::auth::admin_only_middleware;
use crate::models::report::{DashboardData, ProfitLossReport};
use crate::models::transaction::LedgerTransaction;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::DateRange;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route(
            "/profit-loss",
            get(profit_loss).route_layer(middleware::from_fn(admin_only_middleware)),
        )
        .route("/transactions", get(list_transactions))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardData>, AppError> {
    let data = ReportController::new(state.pool.clone()).dashboard().await?;
    Ok(Json(data))
}

async fn profit_loss(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<Json<ProfitLossReport>, AppError> {
    let report = ReportController::new(state.pool.clone()).profit_loss(range).await?;
    Ok(Json(report))
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(filters): Query<TransactionFilters>,
) -> Result<Json<Vec<LedgerTransaction>>, AppError> {
    let rows = ReportController::new(state.pool.clone()).transactions(filters).await?;
    Ok(Json(rows))
}

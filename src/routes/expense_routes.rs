use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::expense_controller::ExpenseController;
use crate::dto::expense_dto::{
    CreateExpenseRequest, ExpenseFilters, SummaryFilters, UpdateExpenseRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::expense::{Expense, ExpenseSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_expense_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/summary", get(expense_summary))
        .route("/:id", get(get_expense).put(update_expense).delete(delete_expense))
}

async fn list_expenses(
    State(state): State<AppState>,
    Query(filters): Query<ExpenseFilters>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = ExpenseController::new(state.pool.clone()).list(filters).await?;
    Ok(Json(expenses))
}

async fn create_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let expense = ExpenseController::new(state.pool.clone())
        .create(request, user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Expense>, AppError> {
    let expense = ExpenseController::new(state.pool.clone()).get(id).await?;
    Ok(Json(expense))
}

async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, AppError> {
    let expense = ExpenseController::new(state.pool.clone()).update(id, request).await?;
    Ok(Json(expense))
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ExpenseController::new(state.pool.clone()).delete(id).await?;
    Ok(Json(MessageResponse::new("expense deleted successfully")))
}

async fn expense_summary(
    State(state): State<AppState>,
    Query(range): Query<SummaryFilters>,
) -> Result<Json<ExpenseSummary>, AppError> {
    let summary = ExpenseController::new(state.pool.clone()).summary(range).await?;
    Ok(Json(summary))
}

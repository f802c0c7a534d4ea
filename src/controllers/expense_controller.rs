use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::expense_dto::{CreateExpenseRequest, ExpenseFilters, UpdateExpenseRequest};
use crate::models::expense::{Expense, ExpenseSummary};
use crate::repositories::expense_repository::{ExpenseFields, ExpenseRepository};
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::{non_blank, DateRange};

pub struct ExpenseController {
    repository: ExpenseRepository,
}

impl ExpenseController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ExpenseRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: ExpenseFilters) -> AppResult<Vec<Expense>> {
        let range = filters.range().validated()?;
        self.repository.list(filters.category, range).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Expense> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("expense", id))
    }

    pub async fn create(&self, request: CreateExpenseRequest, created_by: i64) -> AppResult<Expense> {
        request.validate()?;
        let amount = request
            .amount
            .ok_or_else(|| validation_error("amount", "amount is required"))?;

        let fields = ExpenseFields {
            category: request.category,
            amount,
            description: request.description.trim().to_string(),
            recipient: non_blank(request.recipient),
            date: request.date.unwrap_or_else(|| Utc::now().date_naive()),
        };

        let expense = self.repository.create(&fields, created_by).await?;
        info!("💸 Gasto {} registrado: {} en {:?}", expense.id, expense.amount, expense.category);
        Ok(expense)
    }

    pub async fn update(&self, id: i64, request: UpdateExpenseRequest) -> AppResult<Expense> {
        request.validate()?;

        let existing = self.get(id).await?;
        let fields = ExpenseFields {
            category: request.category.unwrap_or(existing.category),
            amount: request.amount.unwrap_or(existing.amount),
            description: request
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or(existing.description),
            recipient: if request.recipient.is_some() {
                non_blank(request.recipient)
            } else {
                existing.recipient
            },
            date: request.date.unwrap_or(existing.date),
        };

        self.repository
            .update(id, &fields)
            .await?
            .ok_or_else(|| not_found_error("expense", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("expense", id));
        }
        Ok(())
    }

    /// Totales por categoría; siempre están las cuatro categorías
    pub async fn summary(&self, range: DateRange) -> AppResult<ExpenseSummary> {
        let range = range.validated()?;
        let totals = self.repository.totals_by_category(range).await?;
        Ok(ExpenseSummary::from_totals(totals))
    }
}

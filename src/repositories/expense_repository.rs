use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::expense::{Expense, ExpenseCategory};
use crate::utils::errors::AppResult;
use crate::utils::validation::DateRange;

const EXPENSE_COLUMNS: &str = "id, category, amount, description, recipient, date, created_by, created_at";

/// Campos editables de un gasto
#[derive(Debug, Clone)]
pub struct ExpenseFields {
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub description: String,
    pub recipient: Option<String>,
    pub date: NaiveDate,
}

pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, category: Option<ExpenseCategory>, range: DateRange) -> AppResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS} FROM expenses
            WHERE ($1::expense_category IS NULL OR category = $1)
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC, id DESC
            "#
        ))
        .bind(category)
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn recent(&self, limit: i64) -> AppResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn create(&self, fields: &ExpenseFields, created_by: i64) -> AppResult<Expense> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO expenses (category, amount, description, recipient, date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(fields.category)
        .bind(fields.amount)
        .bind(&fields.description)
        .bind(&fields.recipient)
        .bind(fields.date)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn update(&self, id: i64, fields: &ExpenseFields) -> AppResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            UPDATE expenses SET category = $2, amount = $3, description = $4, recipient = $5, date = $6
            WHERE id = $1
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.category)
        .bind(fields.amount)
        .bind(&fields.description)
        .bind(&fields.recipient)
        .bind(fields.date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Totales por categoría dentro de la ventana; las categorías sin gastos no aparecen
    pub async fn totals_by_category(&self, range: DateRange) -> AppResult<Vec<(ExpenseCategory, Decimal)>> {
        let totals = sqlx::query_as::<_, (ExpenseCategory, Decimal)>(
            r#"
            SELECT category, COALESCE(SUM(amount), 0) FROM expenses
            WHERE ($1::date IS NULL OR date >= $1)
              AND ($2::date IS NULL OR date <= $2)
            GROUP BY category
            "#,
        )
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }
}

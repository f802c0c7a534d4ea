use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::expense::ExpenseCategory;
use crate::utils::validation::{validate_positive_amount, DateRange};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub category: ExpenseCategory,
    #[validate(
        required(message = "amount is required"),
        custom = "validate_positive_amount"
    )]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: String,
    pub recipient: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateExpenseRequest {
    pub category: Option<ExpenseCategory>,
    #[validate(custom = "validate_positive_amount")]
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub recipient: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilters {
    pub category: Option<ExpenseCategory>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilters {
    pub fn range(&self) -> DateRange {
        DateRange { start_date: self.start_date, end_date: self.end_date }
    }
}

/// Ventana de fechas del resumen de gastos
pub type SummaryFilters = DateRange;

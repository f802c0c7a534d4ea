//! Modelos de reportes: tablero y estado de resultados

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::expense::{Expense, ExpenseSummary};

/// Datos del tablero principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub tractors_in_stock: i64,
    pub low_stock_parts: i64,
    pub recent_expenses: Vec<Expense>,
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
}

/// Estado de resultados para una ventana de fechas opcional
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfitLossReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_sales: Decimal,
    pub total_purchases: Decimal,
    pub total_expenses: Decimal,
    pub expenses_by_category: ExpenseSummary,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
}

impl ProfitLossReport {
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        total_sales: Decimal,
        total_purchases: Decimal,
        expenses_by_category: ExpenseSummary,
    ) -> Self {
        let total_expenses = expenses_by_category.total();
        let gross_profit = total_sales - total_purchases;
        Self {
            start_date,
            end_date,
            total_sales,
            total_purchases,
            total_expenses,
            expenses_by_category,
            gross_profit,
            net_profit: gross_profit - total_expenses,
        }
    }
}

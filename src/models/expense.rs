//! Modelo de Expense
//!
//! Gastos de la agencia con categoría cerrada.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Categoría del gasto - mapea al ENUM expense_category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "expense_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Salary,
    Rent,
    Bill,
    Misc,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Salary,
        ExpenseCategory::Rent,
        ExpenseCategory::Bill,
        ExpenseCategory::Misc,
    ];
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        ExpenseCategory::Misc
    }
}

/// Expense - mapea exactamente a la tabla expenses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub description: String,
    pub recipient: Option<String>,
    pub date: NaiveDate,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Total de gastos por categoría
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseSummary {
    pub salary: Decimal,
    pub rent: Decimal,
    pub bill: Decimal,
    pub misc: Decimal,
}

impl ExpenseSummary {
    /// Arma el resumen a partir de filas agrupadas; las categorías ausentes quedan en cero
    pub fn from_totals<I>(totals: I) -> Self
    where
        I: IntoIterator<Item = (ExpenseCategory, Decimal)>,
    {
        let mut summary = Self::default();
        for (category, amount) in totals {
            let slot = match category {
                ExpenseCategory::Salary => &mut summary.salary,
                ExpenseCategory::Rent => &mut summary.rent,
                ExpenseCategory::Bill => &mut summary.bill,
                ExpenseCategory::Misc => &mut summary.misc,
            };
            *slot += amount;
        }
        summary
    }

    pub fn total(&self) -> Decimal {
        self.salary + self.rent + self.bill + self.misc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_fills_missing_categories() {
        let summary = ExpenseSummary::from_totals(vec![
            (ExpenseCategory::Rent, dec!(30000)),
            (ExpenseCategory::Bill, dec!(4200.75)),
        ]);
        assert_eq!(summary.salary, Decimal::ZERO);
        assert_eq!(summary.rent, dec!(30000));
        assert_eq!(summary.bill, dec!(4200.75));
        assert_eq!(summary.misc, Decimal::ZERO);
        assert_eq!(summary.total(), dec!(34200.75));
    }

    #[test]
    fn test_summary_serializes_every_category() {
        let json = serde_json::to_value(ExpenseSummary::default()).unwrap();
        for key in ["salary", "rent", "bill", "misc"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_default_category_is_misc() {
        assert_eq!(ExpenseCategory::default(), ExpenseCategory::Misc);
        assert_eq!(ExpenseCategory::ALL.len(), 4);
    }
}

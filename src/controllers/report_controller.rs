use sqlx::PgPool;

use crate::dto::report_dto::TransactionFilters;
use crate::models::expense::ExpenseSummary;
use crate::models::report::{DashboardData, ProfitLossReport};
use crate::models::tractor::TractorStatus;
use crate::models::transaction::{LedgerTransaction, TransactionType};
use crate::repositories::expense_repository::ExpenseRepository;
use crate::repositories::part_repository::PartRepository;
use crate::repositories::tractor_repository::TractorRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::utils::errors::AppResult;
use crate::utils::validation::DateRange;

/// Cantidad de gastos recientes en el dashboard
const RECENT_EXPENSES_LIMIT: i64 = 5;

pub struct ReportController {
    tractors: TractorRepository,
    parts: PartRepository,
    expenses: ExpenseRepository,
    transactions: TransactionRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            tractors: TractorRepository::new(pool.clone()),
            parts: PartRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool),
        }
    }

    pub async fn dashboard(&self) -> AppResult<DashboardData> {
        let all_time = DateRange::default();

        let (tractors_in_stock, low_stock_parts, recent_expenses, total_sales, expense_totals) = tokio::try_join!(
            self.tractors.count_by_status(TractorStatus::InStock),
            self.parts.count_low_stock(),
            self.expenses.recent(RECENT_EXPENSES_LIMIT),
            self.transactions.sum_by_type(TransactionType::Sale, all_time),
            self.expenses.totals_by_category(all_time),
        )?;

        Ok(DashboardData {
            tractors_in_stock,
            low_stock_parts,
            recent_expenses,
            total_sales,
            total_expenses: ExpenseSummary::from_totals(expense_totals).total(),
        })
    }

    /// Ganancias y pérdidas dentro de la ventana (solo admin, verificado en la ruta)
    pub async fn profit_loss(&self, range: DateRange) -> AppResult<ProfitLossReport> {
        let range = range.validated()?;

        let (total_sales, total_purchases, expense_totals) = tokio::try_join!(
            self.transactions.sum_by_type(TransactionType::Sale, range),
            self.transactions.sum_by_type(TransactionType::Purchase, range),
            self.expenses.totals_by_category(range),
        )?;

        Ok(ProfitLossReport::new(
            range.start_date,
            range.end_date,
            total_sales,
            total_purchases,
            ExpenseSummary::from_totals(expense_totals),
        ))
    }

    pub async fn transactions(&self, filters: TransactionFilters) -> AppResult<Vec<LedgerTransaction>> {
        let range = filters.range().validated()?;
        self.transactions
            .list(filters.transaction_type, filters.entity_type, range)
            .await
    }
}

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::transaction::{EntityType, TransactionType};
use crate::utils::validation::DateRange;

/// Filtros del listado del libro mayor
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilters {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub entity_type: Option<EntityType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilters {
    pub fn range(&self) -> DateRange {
        DateRange { start_date: self.start_date, end_date: self.end_date }
    }
}

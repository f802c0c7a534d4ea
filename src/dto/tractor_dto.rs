//! DTOs de tractores
//!
//! Requests de alta, edición y venta, con las líneas detalladas
//! de débito/crédito que alimentan el libro mayor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::tractor::{TractorStatus, TractorType};
use crate::models::transaction::{LedgerLine, LineKind};
use crate::utils::validation::{validate_non_negative_amount, validate_not_blank};

/// Año por defecto cuando el cliente no lo envía
pub const DEFAULT_TRACTOR_YEAR: i32 = 2024;

/// Línea detallada tal como llega del cliente
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LedgerLineRequest {
    #[serde(rename = "type")]
    pub kind: LineKind,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub category: String,
    pub description: Option<String>,
    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,
}

impl From<LedgerLineRequest> for LedgerLine {
    fn from(request: LedgerLineRequest) -> Self {
        LedgerLine {
            kind: request.kind,
            category: request.category.trim().to_string(),
            description: request.description,
            amount: request.amount,
        }
    }
}

/// Cada línea debe tener categoría y un monto no negativo
pub fn validate_lines(lines: &[LedgerLineRequest]) -> Result<(), ValidationError> {
    if lines.iter().any(|line| line.validate().is_err()) {
        let mut error = ValidationError::new("ledger_line");
        error.message = Some("every line needs a category and a non-negative amount".into());
        return Err(error);
    }
    Ok(())
}

/// Convierte una lista opcional de líneas; ausente o vacía son equivalentes
pub fn into_lines(lines: Option<Vec<LedgerLineRequest>>) -> Vec<LedgerLine> {
    lines
        .unwrap_or_default()
        .into_iter()
        .map(LedgerLine::from)
        .collect()
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTractorRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub brand: String,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub model: String,
    #[validate(range(min = 1900, max = 2100, message = "year is out of range"))]
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub tractor_type: Option<TractorType>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    #[validate(custom = "validate_non_negative_amount")]
    pub purchase_price: Option<Decimal>,
    pub supplier_name: Option<String>,
    pub supplier_father_name: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_phone: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[validate(custom = "validate_lines")]
    pub transactions: Option<Vec<LedgerLineRequest>>,
}

/// Edición parcial: solo los campos presentes se aplican
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTractorRequest {
    #[validate(custom = "validate_not_blank")]
    pub brand: Option<String>,
    #[validate(custom = "validate_not_blank")]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "year is out of range"))]
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub tractor_type: Option<TractorType>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    #[validate(custom = "validate_non_negative_amount")]
    pub purchase_price: Option<Decimal>,
    #[validate(custom = "validate_non_negative_amount")]
    pub sale_price: Option<Decimal>,
    pub status: Option<TractorStatus>,
    pub supplier_name: Option<String>,
    pub supplier_father_name: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_phone: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub sale_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_father_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    #[validate(custom = "validate_lines")]
    pub transactions: Option<Vec<LedgerLineRequest>>,
}

/// Tractor recibido en permuta
#[derive(Debug, Deserialize, Validate)]
pub struct ExchangeTractorRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub brand: String,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub model: String,
    #[validate(range(min = 1900, max = 2100, message = "year is out of range"))]
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub tractor_type: Option<TractorType>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    #[validate(custom = "validate_non_negative_amount")]
    pub purchase_price: Option<Decimal>,
    pub supplier_name: Option<String>,
    pub supplier_father_name: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SellTractorRequest {
    #[validate(
        required(message = "sale_price is required"),
        custom = "validate_non_negative_amount"
    )]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub customer_name: String,
    pub customer_father_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub is_exchange: bool,
    /// Se valida solo cuando `is_exchange` es verdadero
    pub exchange_tractor: Option<ExchangeTractorRequest>,
    #[validate(custom = "validate_lines")]
    pub transactions: Option<Vec<LedgerLineRequest>>,
    #[validate(custom = "validate_lines")]
    pub exchange_transactions: Option<Vec<LedgerLineRequest>>,
}

/// Filtros del listado de tractores
#[derive(Debug, Default, Deserialize)]
pub struct TractorFilters {
    pub status: Option<TractorStatus>,
}

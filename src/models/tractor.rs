//! Modelo de Tractor
//!
//! Este módulo contiene el struct Tractor, sus enums de estado y tipo,
//! y la vista enriquecida con el tractor recibido en permuta.
//! Mapea exactamente a la tabla tractors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::models::transaction::LedgerTransaction;

/// Estado del tractor - mapea al ENUM tractor_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tractor_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TractorStatus {
    InStock,
    Sold,
}

/// Tipo de tractor - mapea al ENUM tractor_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tractor_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TractorType {
    New,
    Used,
}

/// Tractor principal - mapea exactamente a la tabla tractors
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tractor {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub tractor_type: TractorType,
    pub chassis_number: String,
    pub engine_number: String,
    pub purchase_price: Decimal,
    pub sale_price: Option<Decimal>,
    pub status: TractorStatus,
    pub supplier_name: String,
    pub supplier_father_name: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_phone: Option<String>,
    pub purchase_date: NaiveDate,
    pub sale_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_father_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub exchange_tractor_id: Option<i64>,
}

impl Tractor {
    pub fn is_sold(&self) -> bool {
        self.status == TractorStatus::Sold
    }

    /// `sale_price` y `sale_date` presentes si y solo si el tractor está vendido
    pub fn sale_fields_consistent(&self) -> bool {
        let has_sale_fields = self.sale_price.is_some() && self.sale_date.is_some();
        let has_no_sale_fields = self.sale_price.is_none() && self.sale_date.is_none();
        match self.status {
            TractorStatus::Sold => has_sale_fields,
            TractorStatus::InStock => has_no_sale_fields,
        }
    }
}

/// Tractor con su permuta resuelta a un solo nivel
#[derive(Debug, Clone, Serialize)]
pub struct TractorWithExchange {
    #[serde(flatten)]
    pub tractor: Tractor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_tractor: Option<Tractor>,
}

/// Detalle de un tractor: permuta y asientos del libro mayor
#[derive(Debug, Clone, Serialize)]
pub struct TractorDetail {
    #[serde(flatten)]
    pub tractor: TractorWithExchange,
    pub transactions: Vec<LedgerTransaction>,
}

/// Resultado de la venta de un tractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellTractorResult {
    pub message: String,
    pub profit_loss: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<i64>,
}

/// Ganancia o pérdida de una venta, descontando el valor de la permuta si existe
pub fn sale_profit_loss(
    sale_price: Decimal,
    purchase_price: Decimal,
    exchange_value: Option<Decimal>,
) -> Decimal {
    sale_price - purchase_price - exchange_value.unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_tractor() -> Tractor {
        Tractor {
            id: 1,
            brand: "Massey Ferguson".into(),
            model: "385".into(),
            year: 2024,
            tractor_type: TractorType::New,
            chassis_number: "CH-001".into(),
            engine_number: "EN-001".into(),
            purchase_price: dec!(500000),
            sale_price: None,
            status: TractorStatus::InStock,
            supplier_name: "Millat".into(),
            supplier_father_name: None,
            supplier_address: None,
            supplier_phone: None,
            purchase_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            sale_date: None,
            customer_name: None,
            customer_father_name: None,
            customer_address: None,
            customer_phone: None,
            notes: None,
            exchange_tractor_id: None,
        }
    }

    #[test]
    fn test_profit_loss_plain_sale() {
        assert_eq!(sale_profit_loss(dec!(700000), dec!(500000), None), dec!(200000));
    }

    #[test]
    fn test_profit_loss_with_exchange() {
        assert_eq!(
            sale_profit_loss(dec!(700000), dec!(500000), Some(dec!(100000))),
            dec!(100000)
        );
    }

    #[test]
    fn test_sale_fields_consistency() {
        let mut tractor = sample_tractor();
        assert!(tractor.sale_fields_consistent());

        tractor.status = TractorStatus::Sold;
        assert!(!tractor.sale_fields_consistent());

        tractor.sale_price = Some(dec!(650000));
        tractor.sale_date = NaiveDate::from_ymd_opt(2025, 2, 1);
        assert!(tractor.sale_fields_consistent());
        assert!(tractor.is_sold());
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let enriched = TractorWithExchange { tractor: sample_tractor(), exchange_tractor: None };
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["type"], "new");
        assert_eq!(json["status"], "in_stock");
        assert_eq!(json["purchase_date"], "2025-01-10");
        assert!(json.get("exchange_tractor").is_none());
    }

    #[test]
    fn test_status_parsing() {
        let sold: TractorStatus = serde_json::from_value(serde_json::json!("sold")).unwrap();
        assert_eq!(sold, TractorStatus::Sold);
        assert!(serde_json::from_value::<TractorStatus>(serde_json::json!("reserved")).is_err());
    }
}

//! Modelo de ServiceRecord
//!
//! Registros de servicio técnico. Los repuestos consumidos se guardan
//! como JSONB en `parts_used` y descuentan stock al crear el registro.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

/// Estado por defecto de un servicio recién registrado
pub const DEFAULT_SERVICE_STATUS: &str = "completed";

/// Repuesto consumido en un servicio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartUsage {
    pub part_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl PartUsage {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// ServiceRecord - mapea exactamente a la tabla service_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRecord {
    pub id: i64,
    pub tractor_id: Option<i64>,
    pub customer_name: String,
    pub description: String,
    pub labor_cost: Decimal,
    pub parts_cost: Decimal,
    pub total_cost: Decimal,
    pub parts_used: Json<Vec<PartUsage>>,
    pub service_date: NaiveDate,
    pub status: String,
}

/// Costos calculados de un servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCosts {
    pub labor_cost: Decimal,
    pub parts_cost: Decimal,
    pub total_cost: Decimal,
}

/// Calcula costos del servicio.
///
/// Con repuestos, `parts_cost` es la suma de las líneas; sin repuestos
/// se usa el `parts_cost` enviado explícitamente (o cero).
pub fn compute_service_costs(
    labor_cost: Decimal,
    explicit_parts_cost: Option<Decimal>,
    parts_used: &[PartUsage],
) -> ServiceCosts {
    let parts_cost = if parts_used.is_empty() {
        explicit_parts_cost.unwrap_or(Decimal::ZERO)
    } else {
        parts_used.iter().map(PartUsage::line_total).sum()
    };

    ServiceCosts {
        labor_cost,
        parts_cost,
        total_cost: labor_cost + parts_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usage(part_id: i64, quantity: i32, unit_price: Decimal) -> PartUsage {
        PartUsage { part_id, name: None, quantity, unit_price }
    }

    #[test]
    fn test_parts_cost_from_lines() {
        let costs = compute_service_costs(dec!(1500), None, &[usage(7, 2, dec!(100))]);
        assert_eq!(costs.parts_cost, dec!(200));
        assert_eq!(costs.total_cost, dec!(1700));
    }

    #[test]
    fn test_lines_override_explicit_parts_cost() {
        let costs = compute_service_costs(
            dec!(0),
            Some(dec!(999)),
            &[usage(1, 3, dec!(10)), usage(2, 1, dec!(5.5))],
        );
        assert_eq!(costs.parts_cost, dec!(35.5));
        assert_eq!(costs.total_cost, costs.labor_cost + costs.parts_cost);
    }

    #[test]
    fn test_explicit_parts_cost_without_lines() {
        let costs = compute_service_costs(dec!(800), Some(dec!(450)), &[]);
        assert_eq!(costs.parts_cost, dec!(450));
        assert_eq!(costs.total_cost, dec!(1250));

        let bare = compute_service_costs(dec!(800), None, &[]);
        assert_eq!(bare.parts_cost, Decimal::ZERO);
        assert_eq!(bare.total_cost, dec!(800));
    }
}

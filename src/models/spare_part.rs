//! Modelo de SparePart
//!
//! Repuestos en inventario. `stock_quantity` nunca baja de cero.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Umbral de stock bajo cuando el cliente no envía `min_stock`
pub const DEFAULT_MIN_STOCK: i32 = 5;

/// SparePart - mapea exactamente a la tabla spare_parts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SparePart {
    pub id: i64,
    pub name: String,
    pub part_number: String,
    pub category: String,
    pub stock_quantity: i32,
    pub unit_price: Decimal,
    pub min_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SparePart {
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock
    }

    /// Importe de vender `quantity` unidades al precio actual
    pub fn sale_amount(&self, quantity: i32) -> Decimal {
        self.unit_price * Decimal::from(quantity)
    }
}

/// Resultado de la venta de repuestos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellPartResult {
    pub message: String,
    pub remaining_stock: i32,
    pub amount: Decimal,
}

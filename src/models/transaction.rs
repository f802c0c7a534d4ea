//! Libro mayor de movimientos de dinero
//!
//! Cada venta o compra de tractor, repuesto o servicio deja una fila
//! en la tabla `transactions`. Las filas no se modifican, solo se agregan.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Tipo de movimiento - mapea al ENUM transaction_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "transaction_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Sale,
    Purchase,
}

/// Entidad que originó el movimiento - mapea al ENUM ledger_entity_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ledger_entity_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Tractor,
    Part,
    Service,
}

/// Fila del libro mayor - mapea exactamente a la tabla transactions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LedgerTransaction {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub amount: Decimal,
    pub party_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: Option<String>,
}

/// Fila a insertar en el libro mayor
#[derive(Debug, Clone, PartialEq)]
pub struct NewLedgerEntry {
    pub transaction_type: TransactionType,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub amount: Decimal,
    pub party_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: Option<String>,
}

/// Lado de una línea detallada: débito (costo) o crédito (abono)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Debit,
    Credit,
}

/// Línea detallada enviada por el cliente al comprar o vender un tractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Decimal,
}

impl LedgerLine {
    /// Monto con signo según el tipo de movimiento.
    ///
    /// En compras el débito suma y el crédito resta; en ventas es al revés.
    pub fn signed_amount(&self, transaction_type: TransactionType) -> Decimal {
        match (transaction_type, self.kind) {
            (TransactionType::Purchase, LineKind::Debit) | (TransactionType::Sale, LineKind::Credit) => {
                self.amount
            }
            (TransactionType::Purchase, LineKind::Credit) | (TransactionType::Sale, LineKind::Debit) => {
                -self.amount
            }
        }
    }

    pub fn ledger_description(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => format!("{} - {}", self.category, desc),
            _ => self.category.clone(),
        }
    }
}

/// Precio de compra a partir de las líneas detalladas: suma de los débitos.
///
/// Los créditos (descuentos) quedan como filas negativas en el libro mayor
/// pero no reducen el precio de compra del tractor.
pub fn purchase_price_from_lines(lines: &[LedgerLine]) -> Decimal {
    lines
        .iter()
        .filter(|line| line.kind == LineKind::Debit)
        .map(|line| line.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(kind: LineKind, amount: Decimal) -> LedgerLine {
        LedgerLine {
            kind,
            category: "Freight".into(),
            description: None,
            amount,
        }
    }

    #[test]
    fn test_signed_amounts() {
        let debit = line(LineKind::Debit, dec!(100));
        let credit = line(LineKind::Credit, dec!(40));

        assert_eq!(debit.signed_amount(TransactionType::Purchase), dec!(100));
        assert_eq!(credit.signed_amount(TransactionType::Purchase), dec!(-40));
        assert_eq!(debit.signed_amount(TransactionType::Sale), dec!(-100));
        assert_eq!(credit.signed_amount(TransactionType::Sale), dec!(40));
    }

    #[test]
    fn test_purchase_price_sums_debits_only() {
        let lines = vec![line(LineKind::Debit, dec!(450000)), line(LineKind::Debit, dec!(15000)), line(LineKind::Credit, dec!(5000))];
        assert_eq!(purchase_price_from_lines(&lines), dec!(465000));

        let only_credit = vec![line(LineKind::Credit, dec!(10))];
        assert_eq!(purchase_price_from_lines(&only_credit), Decimal::ZERO);
    }

    #[test]
    fn test_ledger_description() {
        let mut l = line(LineKind::Debit, dec!(1));
        assert_eq!(l.ledger_description(), "Freight");
        l.description = Some("Lahore to Multan".into());
        assert_eq!(l.ledger_description(), "Freight - Lahore to Multan");
        l.description = Some("   ".into());
        assert_eq!(l.ledger_description(), "Freight");
    }

    #[test]
    fn test_line_deserializes_from_client_shape() {
        let l: LedgerLine = serde_json::from_value(serde_json::json!({
            "type": "credit",
            "category": "Discount",
            "amount": 2500
        }))
        .unwrap();
        assert_eq!(l.kind, LineKind::Credit);
        assert_eq!(l.amount, dec!(2500));
    }

    #[test]
    fn test_enum_parsing() {
        let purchase: TransactionType = serde_json::from_value(serde_json::json!("purchase")).unwrap();
        let service: EntityType = serde_json::from_value(serde_json::json!("service")).unwrap();
        assert_eq!(purchase, TransactionType::Purchase);
        assert_eq!(service, EntityType::Service);
        assert!(serde_json::from_value::<TransactionType>(serde_json::json!("refund")).is_err());
    }
}

//! Utilidades de validación
//!
//! Funciones helper usadas por los DTOs (`#[validate(custom = ...)]`)
//! y por los controladores para filtros de fechas.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::ValidationError;

use crate::utils::errors::{bad_request_error, AppError};

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// Decimales admitidos en montos, igual que las columnas `NUMERIC(15,2)`
pub const MONEY_SCALE: u32 = 2;

fn validate_money_scale(value: &Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > MONEY_SCALE {
        let mut error = ValidationError::new("money_scale");
        error.message = Some("must have at most 2 decimal places".into());
        return Err(error);
    }
    Ok(())
}

/// Validar montos estrictamente positivos
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_money_scale(value)?;
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.message = Some("must be greater than zero".into());
        return Err(error);
    }
    Ok(())
}

/// Validar montos que no pueden ser negativos
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_money_scale(value)?;
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("must not be negative".into());
        return Err(error);
    }
    Ok(())
}

/// Ventana de fechas opcional tomada del query string
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Rechaza ventanas invertidas
    pub fn validated(self) -> Result<Self, AppError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err(bad_request_error("start_date must not be after end_date"))
            }
            _ => Ok(self),
        }
    }
}

/// Normaliza strings opcionales: vacío o solo espacios cuenta como ausente
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("John Deere").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_amount_validators() {
        assert!(validate_positive_amount(&dec!(0.01)).is_ok());
        assert!(validate_positive_amount(&Decimal::ZERO).is_err());
        assert!(validate_positive_amount(&dec!(-5)).is_err());

        assert!(validate_non_negative_amount(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_amount(&dec!(-0.01)).is_err());
    }

    #[test]
    fn test_amounts_limited_to_two_decimals() {
        assert!(validate_non_negative_amount(&dec!(0.005)).is_err());
        assert!(validate_positive_amount(&dec!(12.345)).is_err());
        assert!(validate_non_negative_amount(&dec!(1500.50)).is_ok());
        // ceros a la derecha no cuentan
        assert!(validate_positive_amount(&dec!(99.9000)).is_ok());
    }

    #[test]
    fn test_date_range() {
        let ok = DateRange {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 31),
        };
        assert!(ok.validated().is_ok());
        assert!(DateRange::default().validated().is_ok());

        let inverted = DateRange { start_date: ok.end_date, end_date: ok.start_date };
        assert!(matches!(inverted.validated(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Ali  ".into())), Some("Ali".into()));
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}

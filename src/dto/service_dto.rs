use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_non_negative_amount, validate_not_blank, DateRange};

/// Uso de un repuesto en un servicio; sin `unit_price` se toma el precio actual
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PartUsageRequest {
    pub part_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(custom = "validate_non_negative_amount")]
    pub unit_price: Option<Decimal>,
}

pub fn validate_part_usages(parts: &[PartUsageRequest]) -> Result<(), ValidationError> {
    if parts.iter().any(|part| part.validate().is_err()) {
        let mut error = ValidationError::new("part_usage");
        error.message = Some("every part needs a quantity of at least 1 and a non-negative price".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    pub tractor_id: Option<i64>,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub customer_name: String,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub description: String,
    #[serde(default)]
    #[validate(custom = "validate_non_negative_amount")]
    pub labor_cost: Decimal,
    #[validate(custom = "validate_non_negative_amount")]
    pub parts_cost: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_part_usages")]
    pub parts_used: Vec<PartUsageRequest>,
    pub service_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    pub tractor_id: Option<i64>,
    #[validate(custom = "validate_not_blank")]
    pub customer_name: Option<String>,
    #[validate(custom = "validate_not_blank")]
    pub description: Option<String>,
    #[validate(custom = "validate_non_negative_amount")]
    pub labor_cost: Option<Decimal>,
    #[validate(custom = "validate_non_negative_amount")]
    pub parts_cost: Option<Decimal>,
    #[validate(custom = "validate_part_usages")]
    pub parts_used: Option<Vec<PartUsageRequest>>,
    pub service_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ServiceFilters {
    pub fn range(&self) -> DateRange {
        DateRange { start_date: self.start_date, end_date: self.end_date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_usage_quantity_validated() {
        let request: CreateServiceRequest = serde_json::from_value(serde_json::json!({
            "customer_name": "Farm 12",
            "description": "Oil change",
            "labor_cost": 1500,
            "parts_used": [{ "part_id": 3, "quantity": 0 }]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_minimal_service_is_valid() {
        let request: CreateServiceRequest = serde_json::from_value(serde_json::json!({
            "customer_name": "Farm 12",
            "description": "Inspection"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.parts_used.is_empty());
        assert!(request.labor_cost.is_zero());
    }
}

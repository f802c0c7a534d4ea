use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_non_negative_amount, validate_not_blank};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub part_number: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "stock_quantity must not be negative"))]
    pub stock_quantity: Option<i32>,
    #[validate(custom = "validate_non_negative_amount")]
    pub unit_price: Option<Decimal>,
    #[validate(range(min = 0, message = "min_stock must not be negative"))]
    pub min_stock: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePartRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(custom = "validate_not_blank")]
    pub part_number: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "stock_quantity must not be negative"))]
    pub stock_quantity: Option<i32>,
    #[validate(custom = "validate_non_negative_amount")]
    pub unit_price: Option<Decimal>,
    #[validate(range(min = 0, message = "min_stock must not be negative"))]
    pub min_stock: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SellPartRequest {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default)]
    pub customer_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartFilters {
    pub low_stock: Option<bool>,
}

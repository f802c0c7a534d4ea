use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

/// Alta o renombre de una marca o categoría
#[derive(Debug, Deserialize, Validate)]
pub struct NameRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTractorModelRequest {
    pub brand_id: i64,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartNameRequest {
    pub category_id: i64,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelFilters {
    pub brand_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartNameFilters {
    pub category_id: Option<i64>,
}

//! Tablas de catálogo: marcas y modelos de tractor, categorías y nombres de repuestos

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TractorBrand {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TractorModel {
    pub id: i64,
    pub brand_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PartCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PartName {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
}

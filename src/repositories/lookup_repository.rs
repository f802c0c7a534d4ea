//! Repositorio de tablas de referencia
//!
//! Marcas y modelos de tractor, categorías y nombres de repuestos.
//! La unicidad de nombres (sin distinguir mayúsculas) la garantizan
//! los índices únicos sobre `LOWER(name)`.

use sqlx::PgPool;

use crate::models::lookup::{PartCategory, PartName, TractorBrand, TractorModel};
use crate::utils::errors::AppResult;

pub struct LookupRepository {
    pool: PgPool,
}

impl LookupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---- Marcas ----

    pub async fn list_brands(&self) -> AppResult<Vec<TractorBrand>> {
        let brands = sqlx::query_as::<_, TractorBrand>("SELECT id, name FROM tractor_brands ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(brands)
    }

    pub async fn find_brand_by_name(&self, name: &str) -> AppResult<Option<TractorBrand>> {
        let brand = sqlx::query_as::<_, TractorBrand>(
            "SELECT id, name FROM tractor_brands WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(brand)
    }

    pub async fn create_brand(&self, name: &str) -> AppResult<TractorBrand> {
        let brand = sqlx::query_as::<_, TractorBrand>(
            "INSERT INTO tractor_brands (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(brand)
    }

    pub async fn rename_brand(&self, id: i64, name: &str) -> AppResult<Option<TractorBrand>> {
        let brand = sqlx::query_as::<_, TractorBrand>(
            "UPDATE tractor_brands SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(brand)
    }

    pub async fn delete_brand(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tractor_brands WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---- Modelos ----

    pub async fn list_models(&self, brand_id: Option<i64>) -> AppResult<Vec<TractorModel>> {
        let models = sqlx::query_as::<_, TractorModel>(
            r#"
            SELECT id, brand_id, name FROM tractor_models
            WHERE ($1::bigint IS NULL OR brand_id = $1)
            ORDER BY name
            "#,
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(models)
    }

    pub async fn create_model(&self, brand_id: i64, name: &str) -> AppResult<TractorModel> {
        let model = sqlx::query_as::<_, TractorModel>(
            "INSERT INTO tractor_models (brand_id, name) VALUES ($1, $2) RETURNING id, brand_id, name",
        )
        .bind(brand_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(model)
    }

    pub async fn rename_model(&self, id: i64, name: &str) -> AppResult<Option<TractorModel>> {
        let model = sqlx::query_as::<_, TractorModel>(
            "UPDATE tractor_models SET name = $2 WHERE id = $1 RETURNING id, brand_id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(model)
    }

    pub async fn delete_model(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tractor_models WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---- Categorías de repuestos ----

    pub async fn list_categories(&self) -> AppResult<Vec<PartCategory>> {
        let categories = sqlx::query_as::<_, PartCategory>("SELECT id, name FROM part_categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn find_category_by_name(&self, name: &str) -> AppResult<Option<PartCategory>> {
        let category = sqlx::query_as::<_, PartCategory>(
            "SELECT id, name FROM part_categories WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn create_category(&self, name: &str) -> AppResult<PartCategory> {
        let category = sqlx::query_as::<_, PartCategory>(
            "INSERT INTO part_categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn rename_category(&self, id: i64, name: &str) -> AppResult<Option<PartCategory>> {
        let category = sqlx::query_as::<_, PartCategory>(
            "UPDATE part_categories SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM part_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---- Nombres de repuestos ----

    pub async fn list_part_names(&self, category_id: Option<i64>) -> AppResult<Vec<PartName>> {
        let names = sqlx::query_as::<_, PartName>(
            r#"
            SELECT id, category_id, name FROM part_names
            WHERE ($1::bigint IS NULL OR category_id = $1)
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    pub async fn create_part_name(&self, category_id: i64, name: &str) -> AppResult<PartName> {
        let part_name = sqlx::query_as::<_, PartName>(
            "INSERT INTO part_names (category_id, name) VALUES ($1, $2) RETURNING id, category_id, name",
        )
        .bind(category_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(part_name)
    }

    pub async fn rename_part_name(&self, id: i64, name: &str) -> AppResult<Option<PartName>> {
        let part_name = sqlx::query_as::<_, PartName>(
            "UPDATE part_names SET name = $2 WHERE id = $1 RETURNING id, category_id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(part_name)
    }

    pub async fn delete_part_name(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM part_names WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Controlador de tablas de referencia
//!
//! Las altas de marcas y categorías son idempotentes: si el nombre ya
//! existe (sin distinguir mayúsculas) se devuelve la fila existente.

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::lookup_dto::{
    CreatePartNameRequest, CreateTractorModelRequest, ModelFilters, NameRequest, PartNameFilters,
};
use crate::models::lookup::{PartCategory, PartName, TractorBrand, TractorModel};
use crate::repositories::lookup_repository::LookupRepository;
use crate::utils::errors::{not_found_error, AppResult};

/// Resultado de un alta: la fila y si fue creada ahora
#[derive(Debug)]
pub struct Created<T> {
    pub value: T,
    pub created: bool,
}

pub struct LookupController {
    repository: LookupRepository,
}

impl LookupController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LookupRepository::new(pool),
        }
    }

    pub async fn list_brands(&self) -> AppResult<Vec<TractorBrand>> {
        self.repository.list_brands().await
    }

    pub async fn create_brand(&self, request: NameRequest) -> AppResult<Created<TractorBrand>> {
        request.validate()?;
        let name = request.name.trim();

        if let Some(existing) = self.repository.find_brand_by_name(name).await? {
            return Ok(Created { value: existing, created: false });
        }

        let brand = self.repository.create_brand(name).await?;
        info!("🏷️ Marca '{}' creada", brand.name);
        Ok(Created { value: brand, created: true })
    }

    pub async fn rename_brand(&self, id: i64, request: NameRequest) -> AppResult<TractorBrand> {
        request.validate()?;
        self.repository
            .rename_brand(id, request.name.trim())
            .await?
            .ok_or_else(|| not_found_error("brand", id))
    }

    pub async fn delete_brand(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete_brand(id).await? {
            return Err(not_found_error("brand", id));
        }
        Ok(())
    }

    pub async fn list_models(&self, filters: ModelFilters) -> AppResult<Vec<TractorModel>> {
        self.repository.list_models(filters.brand_id).await
    }

    pub async fn create_model(&self, request: CreateTractorModelRequest) -> AppResult<TractorModel> {
        request.validate()?;
        self.repository
            .create_model(request.brand_id, request.name.trim())
            .await
    }

    pub async fn rename_model(&self, id: i64, request: NameRequest) -> AppResult<TractorModel> {
        request.validate()?;
        self.repository
            .rename_model(id, request.name.trim())
            .await?
            .ok_or_else(|| not_found_error("model", id))
    }

    pub async fn delete_model(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete_model(id).await? {
            return Err(not_found_error("model", id));
        }
        Ok(())
    }

    pub async fn list_categories(&self) -> AppResult<Vec<PartCategory>> {
        self.repository.list_categories().await
    }

    pub async fn create_category(&self, request: NameRequest) -> AppResult<Created<PartCategory>> {
        request.validate()?;
        let name = request.name.trim();

        if let Some(existing) = self.repository.find_category_by_name(name).await? {
            return Ok(Created { value: existing, created: false });
        }

        let category = self.repository.create_category(name).await?;
        info!("🏷️ Categoría '{}' creada", category.name);
        Ok(Created { value: category, created: true })
    }

    pub async fn rename_category(&self, id: i64, request: NameRequest) -> AppResult<PartCategory> {
        request.validate()?;
        self.repository
            .rename_category(id, request.name.trim())
            .await?
            .ok_or_else(|| not_found_error("category", id))
    }

    pub async fn delete_category(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete_category(id).await? {
            return Err(not_found_error("category", id));
        }
        Ok(())
    }

    pub async fn list_part_names(&self, filters: PartNameFilters) -> AppResult<Vec<PartName>> {
        self.repository.list_part_names(filters.category_id).await
    }

    pub async fn create_part_name(&self, request: CreatePartNameRequest) -> AppResult<PartName> {
        request.validate()?;
        self.repository
            .create_part_name(request.category_id, request.name.trim())
            .await
    }

    pub async fn rename_part_name(&self, id: i64, request: NameRequest) -> AppResult<PartName> {
        request.validate()?;
        self.repository
            .rename_part_name(id, request.name.trim())
            .await?
            .ok_or_else(|| not_found_error("part name", id))
    }

    pub async fn delete_part_name(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete_part_name(id).await? {
            return Err(not_found_error("part name", id));
        }
        Ok(())
    }
}

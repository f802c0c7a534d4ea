use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::part_dto::{CreatePartRequest, PartFilters, SellPartRequest, UpdatePartRequest};
use crate::models::spare_part::{SellPartResult, SparePart, DEFAULT_MIN_STOCK};
use crate::models::transaction::{EntityType, NewLedgerEntry, TransactionType};
use crate::repositories::part_repository::{PartFields, PartRepository};
use crate::repositories::transaction_repository::TransactionRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct PartController {
    pool: PgPool,
    repository: PartRepository,
}

impl PartController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self, filters: PartFilters) -> AppResult<Vec<SparePart>> {
        self.repository.list(filters.low_stock.unwrap_or(false)).await
    }

    pub async fn get(&self, id: i64) -> AppResult<SparePart> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("part", id))
    }

    pub async fn create(&self, request: CreatePartRequest) -> AppResult<SparePart> {
        request.validate()?;

        let fields = PartFields {
            name: request.name.trim().to_string(),
            part_number: request.part_number.trim().to_string(),
            category: request.category.unwrap_or_default().trim().to_string(),
            stock_quantity: request.stock_quantity.unwrap_or(0),
            unit_price: request.unit_price.unwrap_or_default(),
            min_stock: request.min_stock.unwrap_or(DEFAULT_MIN_STOCK),
        };

        let part = self.repository.create(&fields).await?;
        info!("🔩 Repuesto {} creado ({})", part.id, part.part_number);
        Ok(part)
    }

    pub async fn update(&self, id: i64, request: UpdatePartRequest) -> AppResult<SparePart> {
        request.validate()?;

        let existing = self.get(id).await?;
        let mut fields = PartFields::from(&existing);
        merge_part(&mut fields, request);

        self.repository
            .update(id, &fields)
            .await?
            .ok_or_else(|| not_found_error("part", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("part", id));
        }
        info!("🗑️ Repuesto {} eliminado", id);
        Ok(())
    }

    /// Vender repuestos: descuenta stock y registra la venta en el libro mayor
    pub async fn sell(&self, id: i64, request: SellPartRequest) -> AppResult<SellPartResult> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let part = PartRepository::find_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("part", id))?;
        if request.quantity > part.stock_quantity {
            warn!(
                "⚠️ Stock insuficiente para {}: pedido {}, disponible {}",
                part.name, request.quantity, part.stock_quantity
            );
            return Err(AppError::InsufficientStock {
                part: part.name,
                requested: request.quantity,
                available: part.stock_quantity,
            });
        }

        let amount = part.sale_amount(request.quantity);
        let updated = PartRepository::set_stock(&mut *tx, id, part.stock_quantity - request.quantity).await?;

        let entry = NewLedgerEntry {
            transaction_type: TransactionType::Sale,
            entity_type: EntityType::Part,
            entity_id: id,
            amount,
            party_name: request.customer_name.trim().to_string(),
            date: Utc::now().date_naive(),
            description: format!("{} x{}", part.name, request.quantity),
            category: None,
        };
        TransactionRepository::insert(&mut *tx, &entry).await?;

        tx.commit().await?;

        info!(
            "🛒 Vendidos {} x {} por {} (stock restante {})",
            request.quantity, part.name, amount, updated.stock_quantity
        );
        Ok(SellPartResult {
            message: "part sold successfully".to_string(),
            remaining_stock: updated.stock_quantity,
            amount,
        })
    }
}

fn merge_part(fields: &mut PartFields, request: UpdatePartRequest) {
    if let Some(name) = request.name {
        fields.name = name.trim().to_string();
    }
    if let Some(part_number) = request.part_number {
        fields.part_number = part_number.trim().to_string();
    }
    if let Some(category) = request.category {
        fields.category = category.trim().to_string();
    }
    if let Some(stock_quantity) = request.stock_quantity {
        fields.stock_quantity = stock_quantity;
    }
    if let Some(unit_price) = request.unit_price {
        fields.unit_price = unit_price;
    }
    if let Some(min_stock) = request.min_stock {
        fields.min_stock = min_stock;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_merge_part_only_touches_present_fields() {
        let mut fields = PartFields {
            name: "Oil filter".into(),
            part_number: "OF-1".into(),
            category: "Filters".into(),
            stock_quantity: 10,
            unit_price: dec!(850),
            min_stock: 5,
        };
        merge_part(
            &mut fields,
            UpdatePartRequest { unit_price: Some(dec!(900)), min_stock: Some(2), ..Default::default() },
        );
        assert_eq!(fields.unit_price, dec!(900));
        assert_eq!(fields.min_stock, 2);
        assert_eq!(fields.name, "Oil filter");
        assert_eq!(fields.stock_quantity, 10);
    }
}

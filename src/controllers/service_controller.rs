//! Controlador de registros de servicio
//!
//! Al crear un servicio se descuenta el stock de cada repuesto usado y se
//! registra la venta del total. Al editar la lista de repuestos se repone
//! la lista anterior antes de consumir la nueva.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::service_dto::{
    CreateServiceRequest, PartUsageRequest, ServiceFilters, UpdateServiceRequest,
};
use crate::models::service_record::{
    compute_service_costs, PartUsage, ServiceCosts, ServiceRecord, DEFAULT_SERVICE_STATUS,
};
use crate::models::transaction::{EntityType, NewLedgerEntry, TransactionType};
use crate::repositories::part_repository::PartRepository;
use crate::repositories::service_repository::{ServiceFields, ServiceRepository};
use crate::repositories::transaction_repository::TransactionRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::non_blank;

pub struct ServiceController {
    pool: PgPool,
    repository: ServiceRepository,
}

impl ServiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self, filters: ServiceFilters) -> AppResult<Vec<ServiceRecord>> {
        let range = filters.range().validated()?;
        self.repository.list(range).await
    }

    pub async fn get(&self, id: i64) -> AppResult<ServiceRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("service record", id))
    }

    pub async fn create(&self, request: CreateServiceRequest) -> AppResult<ServiceRecord> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let parts_used = consume_parts(&mut *tx, &request.parts_used).await?;
        let costs = compute_service_costs(request.labor_cost, request.parts_cost, &parts_used);

        let fields = ServiceFields {
            tractor_id: request.tractor_id,
            customer_name: request.customer_name.trim().to_string(),
            description: request.description.trim().to_string(),
            labor_cost: costs.labor_cost,
            parts_cost: costs.parts_cost,
            total_cost: costs.total_cost,
            parts_used,
            service_date: request.service_date.unwrap_or_else(|| Utc::now().date_naive()),
            status: non_blank(request.status).unwrap_or_else(|| DEFAULT_SERVICE_STATUS.to_string()),
        };
        let record = ServiceRepository::insert(&mut *tx, &fields).await?;

        let entry = NewLedgerEntry {
            transaction_type: TransactionType::Sale,
            entity_type: EntityType::Service,
            entity_id: record.id,
            amount: record.total_cost,
            party_name: record.customer_name.clone(),
            date: record.service_date,
            description: format!("Service: {}", record.description),
            category: None,
        };
        TransactionRepository::insert(&mut *tx, &entry).await?;

        tx.commit().await?;

        info!(
            "🔧 Servicio {} registrado para {}: total {}",
            record.id, record.customer_name, record.total_cost
        );
        Ok(record)
    }

    /// Edición parcial con recálculo de costos
    pub async fn update(&self, id: i64, request: UpdateServiceRequest) -> AppResult<ServiceRecord> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let existing = ServiceRepository::find_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("service record", id))?;
        let mut fields = ServiceFields::from(existing);

        let parts_replaced = request.parts_used.is_some();
        if let Some(parts_request) = &request.parts_used {
            restock_parts(&mut *tx, &fields.parts_used).await?;
            fields.parts_used = consume_parts(&mut *tx, parts_request).await?;
        }

        if request.tractor_id.is_some() {
            fields.tractor_id = request.tractor_id;
        }
        if let Some(customer_name) = request.customer_name {
            fields.customer_name = customer_name.trim().to_string();
        }
        if let Some(description) = request.description {
            fields.description = description.trim().to_string();
        }
        if let Some(service_date) = request.service_date {
            fields.service_date = service_date;
        }
        if let Some(status) = non_blank(request.status) {
            fields.status = status;
        }

        let costs = updated_costs(&fields, request.labor_cost, request.parts_cost, parts_replaced);
        fields.labor_cost = costs.labor_cost;
        fields.parts_cost = costs.parts_cost;
        fields.total_cost = costs.total_cost;

        let record = ServiceRepository::update(&mut *tx, id, &fields).await?;
        tx.commit().await?;

        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("service record", id));
        }
        info!("🗑️ Servicio {} eliminado", id);
        Ok(())
    }
}

/// Costos tras una edición. `fields.parts_used` ya refleja la lista nueva.
///
/// Si la edición reemplazó la lista de repuestos, el costo guardado deja de
/// valer: solo cuenta el `parts_cost` enviado (o cero) cuando la lista queda vacía.
fn updated_costs(
    fields: &ServiceFields,
    labor_cost: Option<Decimal>,
    parts_cost: Option<Decimal>,
    parts_replaced: bool,
) -> ServiceCosts {
    let labor_cost = labor_cost.unwrap_or(fields.labor_cost);
    let explicit_parts_cost = if parts_replaced {
        parts_cost
    } else {
        parts_cost.or(Some(fields.parts_cost))
    };
    compute_service_costs(labor_cost, explicit_parts_cost, &fields.parts_used)
}

/// Descontar el stock de cada repuesto usado y congelar su precio
async fn consume_parts(
    conn: &mut PgConnection,
    requests: &[PartUsageRequest],
) -> AppResult<Vec<PartUsage>> {
    let mut parts_used = Vec::with_capacity(requests.len());

    for usage in requests {
        let part = PartRepository::find_for_update(&mut *conn, usage.part_id)
            .await?
            .ok_or_else(|| not_found_error("part", usage.part_id))?;

        if usage.quantity > part.stock_quantity {
            warn!(
                "⚠️ Stock insuficiente para {} en servicio: pedido {}, disponible {}",
                part.name, usage.quantity, part.stock_quantity
            );
            return Err(AppError::InsufficientStock {
                part: part.name,
                requested: usage.quantity,
                available: part.stock_quantity,
            });
        }

        PartRepository::set_stock(&mut *conn, part.id, part.stock_quantity - usage.quantity).await?;
        info!("📦 Repuesto {} descontado en {}", part.id, usage.quantity);

        parts_used.push(PartUsage {
            part_id: part.id,
            name: Some(part.name),
            quantity: usage.quantity,
            unit_price: usage.unit_price.unwrap_or(part.unit_price),
        });
    }

    Ok(parts_used)
}

/// Devolver al stock los repuestos de una lista anterior (los borrados se omiten)
async fn restock_parts(conn: &mut PgConnection, parts_used: &[PartUsage]) -> AppResult<()> {
    for usage in parts_used {
        let Some(part) = PartRepository::find_for_update(&mut *conn, usage.part_id).await? else {
            continue;
        };
        let restored = part.stock_quantity.saturating_add(usage.quantity);
        PartRepository::set_stock(&mut *conn, part.id, restored).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn stored_fields() -> ServiceFields {
        ServiceFields {
            tractor_id: None,
            customer_name: "Farm 12".into(),
            description: "Hydraulic service".into(),
            labor_cost: dec!(1500),
            parts_cost: dec!(200),
            total_cost: dec!(1700),
            parts_used: vec![PartUsage { part_id: 3, name: None, quantity: 2, unit_price: dec!(100) }],
            service_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            status: DEFAULT_SERVICE_STATUS.into(),
        }
    }

    #[test]
    fn test_emptied_parts_list_drops_parts_cost() {
        let mut fields = stored_fields();
        fields.parts_used = Vec::new();

        let costs = updated_costs(&fields, None, None, true);
        assert_eq!(costs.parts_cost, Decimal::ZERO);
        assert_eq!(costs.total_cost, dec!(1500));

        let costs = updated_costs(&fields, None, Some(dec!(80)), true);
        assert_eq!(costs.parts_cost, dec!(80));
        assert_eq!(costs.total_cost, dec!(1580));
    }

    #[test]
    fn test_replaced_parts_list_is_priced_from_lines() {
        let mut fields = stored_fields();
        fields.parts_used = vec![PartUsage { part_id: 3, name: None, quantity: 1, unit_price: dec!(100) }];

        let costs = updated_costs(&fields, Some(dec!(1000)), Some(dec!(999)), true);
        assert_eq!(costs.parts_cost, dec!(100));
        assert_eq!(costs.total_cost, dec!(1100));
    }

    #[test]
    fn test_untouched_parts_keep_stored_cost() {
        let mut fields = stored_fields();
        fields.parts_used = Vec::new();
        fields.parts_cost = dec!(350);

        let costs = updated_costs(&fields, Some(dec!(500)), None, false);
        assert_eq!(costs.parts_cost, dec!(350));
        assert_eq!(costs.total_cost, dec!(850));
    }
}

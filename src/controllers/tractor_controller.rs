//! Controlador de tractores
//!
//! Alta con asientos de compra, venta con o sin permuta, edición parcial
//! y baja. Cada operación de varios pasos corre en una transacción de
//! PostgreSQL y se revierte completa ante cualquier error.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::tractor_dto::{
    into_lines, CreateTractorRequest, ExchangeTractorRequest, SellTractorRequest, TractorFilters,
    UpdateTractorRequest, DEFAULT_TRACTOR_YEAR,
};
use crate::models::tractor::{
    sale_profit_loss, SellTractorResult, Tractor, TractorDetail, TractorStatus, TractorType,
    TractorWithExchange,
};
use crate::models::transaction::{
    purchase_price_from_lines, EntityType, LedgerLine, NewLedgerEntry, TransactionType,
};
use crate::repositories::tractor_repository::{NewTractor, SaleDetails, TractorRepository};
use crate::repositories::transaction_repository::TransactionRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::non_blank;

/// Categoría de la fila única de compra cuando no hay líneas detalladas
const PURCHASE_PRICE_CATEGORY: &str = "Purchase Price";

pub struct TractorController {
    pool: PgPool,
    repository: TractorRepository,
    transactions: TransactionRepository,
}

impl TractorController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TractorRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool.clone()),
            pool,
        }
    }

    /// Listar tractores con su permuta resuelta (un solo nivel, una sola consulta extra)
    pub async fn list(&self, filters: TractorFilters) -> AppResult<Vec<TractorWithExchange>> {
        let tractors = self.repository.list(filters.status).await?;

        let exchange_ids: Vec<i64> = tractors
            .iter()
            .filter_map(|t| t.exchange_tractor_id)
            .collect();
        let exchanges: HashMap<i64, Tractor> = self
            .repository
            .find_by_ids(&exchange_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(attach_exchanges(tractors, &exchanges))
    }

    pub async fn get(&self, id: i64) -> AppResult<TractorDetail> {
        let tractor = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("tractor", id))?;

        let exchange_tractor = match tractor.exchange_tractor_id {
            Some(exchange_id) => self.repository.find_by_id(exchange_id).await?,
            None => None,
        };
        let transactions = self
            .transactions
            .list_for_entity(EntityType::Tractor, id)
            .await?;

        Ok(TractorDetail {
            tractor: TractorWithExchange { tractor, exchange_tractor },
            transactions,
        })
    }

    /// Registrar la compra de un tractor y sus asientos de compra
    pub async fn create(&self, request: CreateTractorRequest) -> AppResult<Tractor> {
        request.validate()?;

        let lines = into_lines(request.transactions);
        let purchase_price = if lines.is_empty() {
            request.purchase_price.unwrap_or(Decimal::ZERO)
        } else {
            purchase_price_from_lines(&lines)
        };

        let new_tractor = NewTractor {
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year.unwrap_or(DEFAULT_TRACTOR_YEAR),
            tractor_type: request.tractor_type.unwrap_or(TractorType::New),
            chassis_number: request.chassis_number.unwrap_or_default().trim().to_string(),
            engine_number: request.engine_number.unwrap_or_default().trim().to_string(),
            purchase_price,
            supplier_name: request.supplier_name.unwrap_or_default(),
            supplier_father_name: non_blank(request.supplier_father_name),
            supplier_address: non_blank(request.supplier_address),
            supplier_phone: non_blank(request.supplier_phone),
            purchase_date: request.purchase_date.unwrap_or_else(today),
            notes: non_blank(request.notes),
        };

        let mut tx = self.pool.begin().await?;

        let tractor = TractorRepository::insert(&mut *tx, &new_tractor).await?;
        let entries = ledger_entries(
            TransactionType::Purchase,
            tractor.id,
            &lines,
            &tractor.supplier_name,
            tractor.purchase_date,
            tractor.purchase_price,
            format!("{} {} purchase", tractor.brand, tractor.model),
        );
        for entry in &entries {
            TransactionRepository::insert(&mut *tx, entry).await?;
        }

        tx.commit().await?;

        info!(
            "🚜 Tractor {} registrado: {} {} por {}",
            tractor.id, tractor.brand, tractor.model, tractor.purchase_price
        );
        Ok(tractor)
    }

    /// Vender un tractor, opcionalmente recibiendo otro en permuta
    pub async fn sell(&self, id: i64, request: SellTractorRequest) -> AppResult<SellTractorResult> {
        request.validate()?;

        let exchange_request = match (request.is_exchange, request.exchange_tractor) {
            (true, Some(exchange)) => {
                exchange.validate()?;
                Some(exchange)
            }
            (true, None) => {
                return Err(validation_error(
                    "exchange_tractor",
                    "exchange tractor details are required when is_exchange is true",
                ))
            }
            (false, _) => None,
        };

        let sale_price = request
            .sale_price
            .ok_or_else(|| validation_error("sale_price", "sale_price is required"))?;
        let sale = SaleDetails {
            sale_price,
            sale_date: today(),
            customer_name: request.customer_name.trim().to_string(),
            customer_father_name: non_blank(request.customer_father_name),
            customer_address: non_blank(request.customer_address),
            customer_phone: non_blank(request.customer_phone),
        };
        let sale_lines = into_lines(request.transactions);
        let exchange_lines = into_lines(request.exchange_transactions);

        let mut tx = self.pool.begin().await?;

        let tractor = TractorRepository::find_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("tractor", id))?;
        if tractor.is_sold() {
            warn!("⚠️ Intento de vender el tractor {} ya vendido", id);
            return Err(AppError::AlreadySold(id));
        }

        let sold = TractorRepository::mark_sold(&mut *tx, id, &sale).await?;
        let sale_entries = ledger_entries(
            TransactionType::Sale,
            sold.id,
            &sale_lines,
            &sale.customer_name,
            sale.sale_date,
            sale_price,
            format!("{} {} sale", sold.brand, sold.model),
        );
        for entry in &sale_entries {
            TransactionRepository::insert(&mut *tx, entry).await?;
        }

        let Some(exchange_request) = exchange_request else {
            tx.commit().await?;
            info!("💰 Tractor {} vendido a {} por {}", id, sale.customer_name, sale_price);
            return Ok(SellTractorResult {
                message: "tractor sold successfully".to_string(),
                profit_loss: sale_profit_loss(sale_price, sold.purchase_price, None),
                exchange_id: None,
            });
        };

        let trade_in = trade_in_tractor(exchange_request, &sale);
        let exchange = TractorRepository::insert(&mut *tx, &trade_in).await?;
        TractorRepository::set_exchange(&mut *tx, id, exchange.id).await?;

        let exchange_entries = ledger_entries(
            TransactionType::Purchase,
            exchange.id,
            &exchange_lines,
            &exchange.supplier_name,
            sale.sale_date,
            exchange.purchase_price,
            format!("{} {} exchange purchase", exchange.brand, exchange.model),
        );
        for entry in &exchange_entries {
            TransactionRepository::insert(&mut *tx, entry).await?;
        }

        tx.commit().await?;

        info!(
            "🔁 Tractor {} vendido a {} con permuta: tractor {} valuado en {}",
            id, sale.customer_name, exchange.id, exchange.purchase_price
        );
        Ok(SellTractorResult {
            message: "tractor sold with exchange successfully".to_string(),
            profit_loss: sale_profit_loss(sale_price, sold.purchase_price, Some(exchange.purchase_price)),
            exchange_id: Some(exchange.id),
        })
    }

    /// Edición parcial; con líneas detalladas resincroniza los asientos de compra
    pub async fn update(&self, id: i64, mut request: UpdateTractorRequest) -> AppResult<Tractor> {
        request.validate()?;
        let lines = into_lines(request.transactions.take());

        let mut tx = self.pool.begin().await?;

        let mut tractor = TractorRepository::find_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("tractor", id))?;
        apply_update(&mut tractor, request)?;

        if !lines.is_empty() {
            let removed = TransactionRepository::delete_tractor_purchases(&mut *tx, id).await?;
            let entries = ledger_entries(
                TransactionType::Purchase,
                id,
                &lines,
                &tractor.supplier_name,
                tractor.purchase_date,
                Decimal::ZERO,
                String::new(),
            );
            for entry in &entries {
                TransactionRepository::insert(&mut *tx, entry).await?;
            }
            tractor.purchase_price = purchase_price_from_lines(&lines);
            info!(
                "📒 Asientos de compra del tractor {} resincronizados ({} reemplazados por {})",
                id,
                removed,
                entries.len()
            );
        }

        let updated = TractorRepository::update(&mut *tx, &tractor).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Baja de un tractor anulando las referencias desde permutas y servicios
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        TractorRepository::clear_references(&mut *tx, id).await?;
        if !TractorRepository::delete(&mut *tx, id).await? {
            return Err(not_found_error("tractor", id));
        }

        tx.commit().await?;
        info!("🗑️ Tractor {} eliminado", id);
        Ok(())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn attach_exchanges(
    tractors: Vec<Tractor>,
    exchanges: &HashMap<i64, Tractor>,
) -> Vec<TractorWithExchange> {
    tractors
        .into_iter()
        .map(|tractor| {
            let exchange_tractor = tractor
                .exchange_tractor_id
                .and_then(|exchange_id| exchanges.get(&exchange_id).cloned());
            TractorWithExchange { tractor, exchange_tractor }
        })
        .collect()
}

/// Filas del libro mayor de un tractor: una por línea detallada, o una sola
/// por el monto total cuando no hay líneas.
fn ledger_entries(
    transaction_type: TransactionType,
    tractor_id: i64,
    lines: &[LedgerLine],
    party_name: &str,
    date: NaiveDate,
    total: Decimal,
    description: String,
) -> Vec<NewLedgerEntry> {
    let entry = |amount: Decimal, description: String, category: Option<String>| NewLedgerEntry {
        transaction_type,
        entity_type: EntityType::Tractor,
        entity_id: tractor_id,
        amount,
        party_name: party_name.to_string(),
        date,
        description,
        category,
    };

    if lines.is_empty() {
        let category = match transaction_type {
            TransactionType::Purchase => Some(PURCHASE_PRICE_CATEGORY.to_string()),
            TransactionType::Sale => None,
        };
        return vec![entry(total, description, category)];
    }

    lines
        .iter()
        .map(|line| {
            entry(
                line.signed_amount(transaction_type),
                line.ledger_description(),
                Some(line.category.clone()),
            )
        })
        .collect()
}

/// Tractor recibido en permuta; el proveedor por defecto es el comprador.
///
/// Su valor es el `purchase_price` declarado; las líneas de la permuta solo
/// se asientan en el libro mayor.
fn trade_in_tractor(request: ExchangeTractorRequest, sale: &SaleDetails) -> NewTractor {
    let purchase_price = request.purchase_price.unwrap_or(Decimal::ZERO);

    NewTractor {
        brand: request.brand.trim().to_string(),
        model: request.model.trim().to_string(),
        year: request.year.unwrap_or(DEFAULT_TRACTOR_YEAR),
        tractor_type: request.tractor_type.unwrap_or(TractorType::Used),
        chassis_number: request.chassis_number.unwrap_or_default().trim().to_string(),
        engine_number: request.engine_number.unwrap_or_default().trim().to_string(),
        purchase_price,
        supplier_name: non_blank(request.supplier_name).unwrap_or_else(|| sale.customer_name.clone()),
        supplier_father_name: non_blank(request.supplier_father_name)
            .or_else(|| sale.customer_father_name.clone()),
        supplier_address: non_blank(request.supplier_address).or_else(|| sale.customer_address.clone()),
        supplier_phone: non_blank(request.supplier_phone).or_else(|| sale.customer_phone.clone()),
        purchase_date: sale.sale_date,
        notes: non_blank(request.notes),
    }
}

/// Fusionar los campos presentes y verificar la coherencia estado/venta
fn apply_update(tractor: &mut Tractor, request: UpdateTractorRequest) -> AppResult<()> {
    if let Some(brand) = request.brand {
        tractor.brand = brand.trim().to_string();
    }
    if let Some(model) = request.model {
        tractor.model = model.trim().to_string();
    }
    if let Some(year) = request.year {
        tractor.year = year;
    }
    if let Some(tractor_type) = request.tractor_type {
        tractor.tractor_type = tractor_type;
    }
    if let Some(chassis_number) = request.chassis_number {
        tractor.chassis_number = chassis_number.trim().to_string();
    }
    if let Some(engine_number) = request.engine_number {
        tractor.engine_number = engine_number.trim().to_string();
    }
    if let Some(purchase_price) = request.purchase_price {
        tractor.purchase_price = purchase_price;
    }
    if let Some(supplier_name) = request.supplier_name {
        tractor.supplier_name = supplier_name;
    }
    if request.supplier_father_name.is_some() {
        tractor.supplier_father_name = non_blank(request.supplier_father_name);
    }
    if request.supplier_address.is_some() {
        tractor.supplier_address = non_blank(request.supplier_address);
    }
    if request.supplier_phone.is_some() {
        tractor.supplier_phone = non_blank(request.supplier_phone);
    }
    if let Some(purchase_date) = request.purchase_date {
        tractor.purchase_date = purchase_date;
    }
    if request.customer_name.is_some() {
        tractor.customer_name = non_blank(request.customer_name);
    }
    if request.customer_father_name.is_some() {
        tractor.customer_father_name = non_blank(request.customer_father_name);
    }
    if request.customer_address.is_some() {
        tractor.customer_address = non_blank(request.customer_address);
    }
    if request.customer_phone.is_some() {
        tractor.customer_phone = non_blank(request.customer_phone);
    }
    if request.notes.is_some() {
        tractor.notes = non_blank(request.notes);
    }
    if request.sale_price.is_some() {
        tractor.sale_price = request.sale_price;
    }
    if request.sale_date.is_some() {
        tractor.sale_date = request.sale_date;
    }

    match request.status {
        Some(TractorStatus::InStock) => {
            tractor.status = TractorStatus::InStock;
            tractor.sale_price = None;
            tractor.sale_date = None;
            tractor.customer_name = None;
        }
        Some(TractorStatus::Sold) => tractor.status = TractorStatus::Sold,
        None => {}
    }

    if tractor.sale_fields_consistent() {
        return Ok(());
    }
    match tractor.status {
        TractorStatus::Sold => Err(validation_error(
            "status",
            "a sold tractor requires sale_price and sale_date",
        )),
        TractorStatus::InStock => Err(validation_error(
            "status",
            "sale_price and sale_date can only be set on a sold tractor",
        )),
    }
}

//! Repositorio de tractores
//!
//! Lecturas sobre el pool y escrituras sobre la conexión de la
//! transacción abierta por el controlador.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::tractor::{Tractor, TractorStatus, TractorType};
use crate::utils::errors::AppResult;

const TRACTOR_COLUMNS: &str = r#"
    id, brand, model, year, type, chassis_number, engine_number, purchase_price,
    sale_price, status, supplier_name, supplier_father_name, supplier_address,
    supplier_phone, purchase_date, sale_date, customer_name, customer_father_name,
    customer_address, customer_phone, notes, exchange_tractor_id
"#;

/// Datos de un tractor a insertar (siempre entra `in_stock`)
#[derive(Debug, Clone)]
pub struct NewTractor {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub tractor_type: TractorType,
    pub chassis_number: String,
    pub engine_number: String,
    pub purchase_price: Decimal,
    pub supplier_name: String,
    pub supplier_father_name: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_phone: Option<String>,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
}

/// Datos del comprador al vender
#[derive(Debug, Clone)]
pub struct SaleDetails {
    pub sale_price: Decimal,
    pub sale_date: NaiveDate,
    pub customer_name: String,
    pub customer_father_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
}

pub struct TractorRepository {
    pool: PgPool,
}

impl TractorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<TractorStatus>) -> AppResult<Vec<Tractor>> {
        let tractors = sqlx::query_as::<_, Tractor>(&format!(
            r#"
            SELECT {TRACTOR_COLUMNS} FROM tractors
            WHERE ($1::tractor_status IS NULL OR status = $1)
            ORDER BY id DESC
            "#
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(tractors)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Tractor>> {
        let tractor = sqlx::query_as::<_, Tractor>(&format!(
            "SELECT {TRACTOR_COLUMNS} FROM tractors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tractor)
    }

    /// Cargar varios tractores en una sola consulta
    pub async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Tractor>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let tractors = sqlx::query_as::<_, Tractor>(&format!(
            "SELECT {TRACTOR_COLUMNS} FROM tractors WHERE id = ANY($1)"
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(tractors)
    }

    /// Leer y bloquear la fila hasta el fin de la transacción
    pub async fn find_for_update(conn: &mut PgConnection, id: i64) -> AppResult<Option<Tractor>> {
        let tractor = sqlx::query_as::<_, Tractor>(&format!(
            "SELECT {TRACTOR_COLUMNS} FROM tractors WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(tractor)
    }

    pub async fn insert(conn: &mut PgConnection, tractor: &NewTractor) -> AppResult<Tractor> {
        let created = sqlx::query_as::<_, Tractor>(&format!(
            r#"
            INSERT INTO tractors (
                brand, model, year, type, chassis_number, engine_number, purchase_price,
                status, supplier_name, supplier_father_name, supplier_address, supplier_phone,
                purchase_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'in_stock', $8, $9, $10, $11, $12, $13)
            RETURNING {TRACTOR_COLUMNS}
            "#
        ))
        .bind(&tractor.brand)
        .bind(&tractor.model)
        .bind(tractor.year)
        .bind(tractor.tractor_type)
        .bind(&tractor.chassis_number)
        .bind(&tractor.engine_number)
        .bind(tractor.purchase_price)
        .bind(&tractor.supplier_name)
        .bind(&tractor.supplier_father_name)
        .bind(&tractor.supplier_address)
        .bind(&tractor.supplier_phone)
        .bind(tractor.purchase_date)
        .bind(&tractor.notes)
        .fetch_one(&mut *conn)
        .await?;

        Ok(created)
    }

    pub async fn mark_sold(conn: &mut PgConnection, id: i64, sale: &SaleDetails) -> AppResult<Tractor> {
        let sold = sqlx::query_as::<_, Tractor>(&format!(
            r#"
            UPDATE tractors SET
                status = 'sold',
                sale_price = $2,
                sale_date = $3,
                customer_name = $4,
                customer_father_name = $5,
                customer_address = $6,
                customer_phone = $7
            WHERE id = $1
            RETURNING {TRACTOR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(sale.sale_price)
        .bind(sale.sale_date)
        .bind(&sale.customer_name)
        .bind(&sale.customer_father_name)
        .bind(&sale.customer_address)
        .bind(&sale.customer_phone)
        .fetch_one(&mut *conn)
        .await?;

        Ok(sold)
    }

    pub async fn set_exchange(conn: &mut PgConnection, id: i64, exchange_id: i64) -> AppResult<()> {
        sqlx::query("UPDATE tractors SET exchange_tractor_id = $2 WHERE id = $1")
            .bind(id)
            .bind(exchange_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Escribir todos los campos editables de un tractor ya fusionado
    pub async fn update(conn: &mut PgConnection, tractor: &Tractor) -> AppResult<Tractor> {
        let updated = sqlx::query_as::<_, Tractor>(&format!(
            r#"
            UPDATE tractors SET
                brand = $2, model = $3, year = $4, type = $5, chassis_number = $6,
                engine_number = $7, purchase_price = $8, sale_price = $9, status = $10,
                supplier_name = $11, supplier_father_name = $12, supplier_address = $13,
                supplier_phone = $14, purchase_date = $15, sale_date = $16,
                customer_name = $17, customer_father_name = $18, customer_address = $19,
                customer_phone = $20, notes = $21
            WHERE id = $1
            RETURNING {TRACTOR_COLUMNS}
            "#
        ))
        .bind(tractor.id)
        .bind(&tractor.brand)
        .bind(&tractor.model)
        .bind(tractor.year)
        .bind(tractor.tractor_type)
        .bind(&tractor.chassis_number)
        .bind(&tractor.engine_number)
        .bind(tractor.purchase_price)
        .bind(tractor.sale_price)
        .bind(tractor.status)
        .bind(&tractor.supplier_name)
        .bind(&tractor.supplier_father_name)
        .bind(&tractor.supplier_address)
        .bind(&tractor.supplier_phone)
        .bind(tractor.purchase_date)
        .bind(tractor.sale_date)
        .bind(&tractor.customer_name)
        .bind(&tractor.customer_father_name)
        .bind(&tractor.customer_address)
        .bind(&tractor.customer_phone)
        .bind(&tractor.notes)
        .fetch_one(&mut *conn)
        .await?;

        Ok(updated)
    }

    /// Anular referencias a un tractor desde permutas y servicios
    pub async fn clear_references(conn: &mut PgConnection, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE tractors SET exchange_tractor_id = NULL WHERE exchange_tractor_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("UPDATE service_records SET tractor_id = NULL WHERE tractor_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn delete(conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tractors WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_status(&self, status: TractorStatus) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tractors WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

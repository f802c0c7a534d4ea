use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{types::Json, PgConnection, PgPool};

use crate::models::service_record::{PartUsage, ServiceRecord};
use crate::utils::errors::AppResult;
use crate::utils::validation::DateRange;

const SERVICE_COLUMNS: &str = r#"
    id, tractor_id, customer_name, description, labor_cost, parts_cost,
    total_cost, parts_used, service_date, status
"#;

/// Campos persistidos de un registro de servicio
#[derive(Debug, Clone)]
pub struct ServiceFields {
    pub tractor_id: Option<i64>,
    pub customer_name: String,
    pub description: String,
    pub labor_cost: Decimal,
    pub parts_cost: Decimal,
    pub total_cost: Decimal,
    pub parts_used: Vec<PartUsage>,
    pub service_date: NaiveDate,
    pub status: String,
}

impl From<ServiceRecord> for ServiceFields {
    fn from(record: ServiceRecord) -> Self {
        Self {
            tractor_id: record.tractor_id,
            customer_name: record.customer_name,
            description: record.description,
            labor_cost: record.labor_cost,
            parts_cost: record.parts_cost,
            total_cost: record.total_cost,
            parts_used: record.parts_used.0,
            service_date: record.service_date,
            status: record.status,
        }
    }
}

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, range: DateRange) -> AppResult<Vec<ServiceRecord>> {
        let records = sqlx::query_as::<_, ServiceRecord>(&format!(
            r#"
            SELECT {SERVICE_COLUMNS} FROM service_records
            WHERE ($1::date IS NULL OR service_date >= $1)
              AND ($2::date IS NULL OR service_date <= $2)
            ORDER BY service_date DESC, id DESC
            "#
        ))
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<ServiceRecord>> {
        let record = sqlx::query_as::<_, ServiceRecord>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_for_update(conn: &mut PgConnection, id: i64) -> AppResult<Option<ServiceRecord>> {
        let record = sqlx::query_as::<_, ServiceRecord>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_records WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(record)
    }

    pub async fn insert(conn: &mut PgConnection, fields: &ServiceFields) -> AppResult<ServiceRecord> {
        let record = sqlx::query_as::<_, ServiceRecord>(&format!(
            r#"
            INSERT INTO service_records (
                tractor_id, customer_name, description, labor_cost, parts_cost,
                total_cost, parts_used, service_date, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(fields.tractor_id)
        .bind(&fields.customer_name)
        .bind(&fields.description)
        .bind(fields.labor_cost)
        .bind(fields.parts_cost)
        .bind(fields.total_cost)
        .bind(Json(&fields.parts_used))
        .bind(fields.service_date)
        .bind(&fields.status)
        .fetch_one(&mut *conn)
        .await?;

        Ok(record)
    }

    pub async fn update(conn: &mut PgConnection, id: i64, fields: &ServiceFields) -> AppResult<ServiceRecord> {
        let record = sqlx::query_as::<_, ServiceRecord>(&format!(
            r#"
            UPDATE service_records SET
                tractor_id = $2, customer_name = $3, description = $4, labor_cost = $5,
                parts_cost = $6, total_cost = $7, parts_used = $8, service_date = $9, status = $10
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.tractor_id)
        .bind(&fields.customer_name)
        .bind(&fields.description)
        .bind(fields.labor_cost)
        .bind(fields.parts_cost)
        .bind(fields.total_cost)
        .bind(Json(&fields.parts_used))
        .bind(fields.service_date)
        .bind(&fields.status)
        .fetch_one(&mut *conn)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM service_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

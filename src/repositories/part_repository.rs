use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::spare_part::SparePart;
use crate::utils::errors::AppResult;

const PART_COLUMNS: &str =
    "id, name, part_number, category, stock_quantity, unit_price, min_stock, created_at, updated_at";

/// Campos editables de un repuesto
#[derive(Debug, Clone)]
pub struct PartFields {
    pub name: String,
    pub part_number: String,
    pub category: String,
    pub stock_quantity: i32,
    pub unit_price: Decimal,
    pub min_stock: i32,
}

impl From<&SparePart> for PartFields {
    fn from(part: &SparePart) -> Self {
        Self {
            name: part.name.clone(),
            part_number: part.part_number.clone(),
            category: part.category.clone(),
            stock_quantity: part.stock_quantity,
            unit_price: part.unit_price,
            min_stock: part.min_stock,
        }
    }
}

pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado completo por nombre, o solo stock bajo ordenado por cantidad
    pub async fn list(&self, low_stock_only: bool) -> AppResult<Vec<SparePart>> {
        let query = if low_stock_only {
            format!("SELECT {PART_COLUMNS} FROM spare_parts WHERE stock_quantity <= min_stock ORDER BY stock_quantity, name")
        } else {
            format!("SELECT {PART_COLUMNS} FROM spare_parts ORDER BY name, id")
        };

        let parts = sqlx::query_as::<_, SparePart>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(parts)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<SparePart>> {
        let part = sqlx::query_as::<_, SparePart>(&format!(
            "SELECT {PART_COLUMNS} FROM spare_parts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn find_for_update(conn: &mut PgConnection, id: i64) -> AppResult<Option<SparePart>> {
        let part = sqlx::query_as::<_, SparePart>(&format!(
            "SELECT {PART_COLUMNS} FROM spare_parts WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(part)
    }

    pub async fn create(&self, fields: &PartFields) -> AppResult<SparePart> {
        let part = sqlx::query_as::<_, SparePart>(&format!(
            r#"
            INSERT INTO spare_parts (name, part_number, category, stock_quantity, unit_price, min_stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.part_number)
        .bind(&fields.category)
        .bind(fields.stock_quantity)
        .bind(fields.unit_price)
        .bind(fields.min_stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn update(&self, id: i64, fields: &PartFields) -> AppResult<Option<SparePart>> {
        let part = sqlx::query_as::<_, SparePart>(&format!(
            r#"
            UPDATE spare_parts SET
                name = $2, part_number = $3, category = $4, stock_quantity = $5,
                unit_price = $6, min_stock = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.part_number)
        .bind(&fields.category)
        .bind(fields.stock_quantity)
        .bind(fields.unit_price)
        .bind(fields.min_stock)
        .fetch_optional(&self.pool)
        .await?;

        Ok(part)
    }

    /// Fijar el stock de una fila previamente bloqueada
    pub async fn set_stock(conn: &mut PgConnection, id: i64, stock_quantity: i32) -> AppResult<SparePart> {
        let part = sqlx::query_as::<_, SparePart>(&format!(
            r#"
            UPDATE spare_parts SET stock_quantity = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(stock_quantity)
        .fetch_one(&mut *conn)
        .await?;

        Ok(part)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM spare_parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_low_stock(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE stock_quantity <= min_stock",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

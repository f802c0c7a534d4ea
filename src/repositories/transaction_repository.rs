//! Repositorio del libro mayor
//!
//! Las escrituras reciben la conexión de la transacción en curso
//! para quedar dentro de la misma operación atómica.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::transaction::{EntityType, LedgerTransaction, NewLedgerEntry, TransactionType};
use crate::utils::errors::AppResult;
use crate::utils::validation::DateRange;

const LEDGER_COLUMNS: &str =
    "id, type, entity_type, entity_id, amount, party_name, date, description, category";

pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Agregar una fila al libro mayor
    pub async fn insert(conn: &mut PgConnection, entry: &NewLedgerEntry) -> AppResult<LedgerTransaction> {
        let row = sqlx::query_as::<_, LedgerTransaction>(&format!(
            r#"
            INSERT INTO transactions (type, entity_type, entity_id, amount, party_name, date, description, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LEDGER_COLUMNS}
            "#
        ))
        .bind(entry.transaction_type)
        .bind(entry.entity_type)
        .bind(entry.entity_id)
        .bind(entry.amount)
        .bind(&entry.party_name)
        .bind(entry.date)
        .bind(&entry.description)
        .bind(&entry.category)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Borrar las filas de compra de un tractor (sincronización de líneas)
    pub async fn delete_tractor_purchases(conn: &mut PgConnection, tractor_id: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM transactions WHERE type = 'purchase' AND entity_type = 'tractor' AND entity_id = $1",
        )
        .bind(tractor_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_for_entity(
        &self,
        entity_type: EntityType,
        entity_id: i64,
    ) -> AppResult<Vec<LedgerTransaction>> {
        let rows = sqlx::query_as::<_, LedgerTransaction>(&format!(
            "SELECT {LEDGER_COLUMNS} FROM transactions WHERE entity_type = $1 AND entity_id = $2 ORDER BY date, id"
        ))
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list(
        &self,
        transaction_type: Option<TransactionType>,
        entity_type: Option<EntityType>,
        range: DateRange,
    ) -> AppResult<Vec<LedgerTransaction>> {
        let rows = sqlx::query_as::<_, LedgerTransaction>(&format!(
            r#"
            SELECT {LEDGER_COLUMNS} FROM transactions
            WHERE ($1::transaction_type IS NULL OR type = $1)
              AND ($2::ledger_entity_type IS NULL OR entity_type = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY date DESC, id DESC
            "#
        ))
        .bind(transaction_type)
        .bind(entity_type)
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Suma de montos de un tipo dentro de la ventana (0 si no hay filas)
    pub async fn sum_by_type(
        &self,
        transaction_type: TransactionType,
        range: DateRange,
    ) -> AppResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM transactions
            WHERE type = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            "#,
        )
        .bind(transaction_type)
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

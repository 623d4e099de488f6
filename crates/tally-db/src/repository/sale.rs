//! # Sale Repository
//!
//! Database operations for the append-only sales ledger.
//!
//! A `sold_records` row is written exactly once per committed sale and never
//! updated or deleted. Referential integrity is enforced: the pool enables
//! foreign keys, so an append with a dangling item or cashier id fails with
//! [`crate::DbError::ForeignKeyViolation`] rather than silently recording
//! an orphan.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use tally_core::SaleRecord;

const SALE_COLUMNS: &str = "id, item_id, cashier_id, quantity, sold_at";

/// Repository for sales ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Appends an immutable ledger row.
    ///
    /// This is the standalone form (manual corrections, imports); a normal
    /// sale goes through [`crate::Checkout::sell`], which appends inside the
    /// same transaction as the stock decrement.
    ///
    /// ## Errors
    /// * `ForeignKeyViolation` - item_id or cashier_id doesn't exist
    /// * `QueryFailed` - quantity failed the `CHECK (quantity > 0)`
    pub async fn append(
        &self,
        item_id: i64,
        quantity: i64,
        cashier_id: i64,
    ) -> DbResult<SaleRecord> {
        debug!(item_id, quantity, cashier_id, "Appending sale record");

        let mut conn = self.pool.acquire().await?;
        Self::append_in_tx(&mut conn, item_id, quantity, cashier_id, Utc::now()).await
    }

    /// Appends a ledger row on an existing connection (checkout's
    /// transaction or a standalone acquire).
    pub(crate) async fn append_in_tx(
        conn: &mut SqliteConnection,
        item_id: i64,
        quantity: i64,
        cashier_id: i64,
        sold_at: DateTime<Utc>,
    ) -> DbResult<SaleRecord> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO sold_records (item_id, cashier_id, quantity, sold_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(item_id)
        .bind(cashier_id)
        .bind(quantity)
        .bind(sold_at)
        .execute(&mut *conn)
        .await?;

        let record = sqlx::query_as::<_, SaleRecord>(&format!(
            "SELECT {SALE_COLUMNS} FROM sold_records WHERE id = ?1"
        ))
        .bind(inserted.last_insert_rowid())
        .fetch_one(conn)
        .await?;

        Ok(record)
    }

    /// Gets a ledger row by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<SaleRecord>> {
        let record = sqlx::query_as::<_, SaleRecord>(&format!(
            "SELECT {SALE_COLUMNS} FROM sold_records WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists all ledger rows for one item, oldest first.
    pub async fn list_for_item(&self, item_id: i64) -> DbResult<Vec<SaleRecord>> {
        let records = sqlx::query_as::<_, SaleRecord>(&format!(
            "SELECT {SALE_COLUMNS} FROM sold_records WHERE item_id = ?1 ORDER BY id"
        ))
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Counts ledger rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sold_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::testutil::{draft, seed_cashier, test_db};

    #[tokio::test]
    async fn test_append_and_read_back() {
        let db = test_db().await;
        let cashier = seed_cashier(&db, "casey").await;
        let item = db
            .items()
            .upsert(&draft("Sugar", "Grocery", 20, 300, 180))
            .await
            .unwrap();

        let record = db.sales().append(item.id, 3, cashier.id).await.unwrap();
        assert_eq!(record.item_id, item.id);
        assert_eq!(record.cashier_id, cashier.id);
        assert_eq!(record.quantity, 3);

        let found = db.sales().get_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.quantity, 3);
        assert_eq!(db.sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_rejects_dangling_item() {
        let db = test_db().await;
        let cashier = seed_cashier(&db, "casey").await;

        let err = db.sales().append(9999, 1, cashier.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_append_rejects_dangling_cashier() {
        let db = test_db().await;
        let item = db
            .items()
            .upsert(&draft("Sugar", "Grocery", 20, 300, 180))
            .await
            .unwrap();

        let err = db.sales().append(item.id, 1, 424242).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_for_item_ordered() {
        let db = test_db().await;
        let cashier = seed_cashier(&db, "casey").await;
        let item = db
            .items()
            .upsert(&draft("Sugar", "Grocery", 20, 300, 180))
            .await
            .unwrap();

        db.sales().append(item.id, 1, cashier.id).await.unwrap();
        db.sales().append(item.id, 2, cashier.id).await.unwrap();

        let records = db.sales().list_for_item(item.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].id < records[1].id);
    }
}

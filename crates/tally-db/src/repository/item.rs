//! # Item Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Upsert keyed on the `(name, category)` business pair
//! - Search by id or case-insensitive name substring
//! - Low-stock (scarcity) listing
//! - The transaction-scoped conditional decrement used by checkout
//!
//! ## Upsert
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  upsert(name="Widget", category="Tool", qty=5, ...)             │
//! │       │                                                         │
//! │       ├── (name, category) exists?                              │
//! │       │        │                                                │
//! │       │        ├── yes: quantity += 5, price/cost overwritten   │
//! │       │        └── no:  new row with quantity = 5               │
//! │       │                                                         │
//! │       └── returns the resulting Item either way                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use tally_core::{CatalogQuery, Item, ItemDraft};

/// Columns selected for every `Item` row mapping.
const ITEM_COLUMNS: &str =
    "id, name, unit, category, quantity, price_cents, cost_cents, created_at";

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.items();
///
/// let item = repo.upsert(&draft).await?;
/// let hits = repo.search(&CatalogQuery::parse("sugar")).await?;
/// let low = repo.list_scarce(10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Creates or restocks a catalog line.
    ///
    /// If an item with the draft's `(name, category)` exists, its quantity
    /// is incremented by the draft quantity and its price/cost overwritten;
    /// otherwise a new line is inserted. Runs in a transaction so a restock
    /// racing a concurrent insert cannot interleave.
    ///
    /// Field validation (`validate_item_draft`) is the caller's job.
    pub async fn upsert(&self, draft: &ItemDraft) -> DbResult<Item> {
        debug!(name = %draft.name, category = %draft.category, "Upserting item");

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE items SET
                quantity = quantity + ?3,
                price_cents = ?4,
                cost_cents = ?5
            WHERE name = ?1 AND category = ?2
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(draft.price_cents)
        .bind(draft.cost_cents)
        .execute(&mut *tx)
        .await?;

        let id = if updated.rows_affected() == 0 {
            let now = Utc::now();
            let inserted = sqlx::query(
                r#"
                INSERT INTO items (name, unit, category, quantity, price_cents, cost_cents, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&draft.name)
            .bind(&draft.unit)
            .bind(&draft.category)
            .bind(draft.quantity)
            .bind(draft.price_cents)
            .bind(draft.cost_cents)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            inserted.last_insert_rowid()
        } else {
            sqlx::query_scalar::<_, i64>("SELECT id FROM items WHERE name = ?1 AND category = ?2")
                .bind(&draft.name)
                .bind(&draft.category)
                .fetch_one(&mut *tx)
                .await?
        };

        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id = item.id, quantity = item.quantity, "Item upserted");
        Ok(item)
    }

    /// Gets an item by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - item found
    /// * `Ok(None)` - no such id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Searches the catalog.
    ///
    /// Numeric input matches exactly one id, anything else is a
    /// case-insensitive substring on the name, empty input lists everything.
    /// Results come back in id order; no match is an empty vec, not an error.
    ///
    /// Use [`tally_core::validation::validate_search_query`] on raw user
    /// input before parsing.
    pub async fn search(&self, query: &CatalogQuery) -> DbResult<Vec<Item>> {
        debug!(?query, "Searching catalog");

        let items = match query {
            CatalogQuery::All => {
                sqlx::query_as::<_, Item>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items ORDER BY id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            CatalogQuery::Id(id) => {
                self.get_by_id(*id).await?.into_iter().collect()
            }
            CatalogQuery::Name(needle) => {
                // SQLite LIKE is case-insensitive for ASCII by default.
                let pattern = format!("%{needle}%");
                sqlx::query_as::<_, Item>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items WHERE name LIKE ?1 ORDER BY id"
                ))
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = items.len(), "Search returned items");
        Ok(items)
    }

    /// Lists items with quantity strictly below the threshold, in id order.
    pub async fn list_scarce(&self, threshold: i64) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE quantity < ?1 ORDER BY id"
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts catalog lines (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Conditionally decrements stock inside the checkout transaction.
    ///
    /// The availability check and the decrement are one statement
    /// (`WHERE quantity >= amount`), so two concurrent sells can never both
    /// take the last units. Returns the number of rows affected: 0 means
    /// either the item doesn't exist or stock is insufficient, and the
    /// caller distinguishes the two.
    ///
    /// Crate-private on purpose: it takes the transaction's connection and
    /// must never run standalone, otherwise the decrement and the ledger
    /// append could commit separately.
    pub(crate) async fn decrement(
        conn: &mut SqliteConnection,
        id: i64,
        amount: i64,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE items SET quantity = quantity - ?2 WHERE id = ?1 AND quantity >= ?2",
        )
        .bind(id)
        .bind(amount)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Fetches an item inside an open transaction (checkout's rejection
    /// diagnosis reads the row it just failed to decrement).
    pub(crate) async fn get_by_id_in_tx(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Checkout: the Sale Transaction Coordinator
//!
//! The one stateful operation in the system: atomically take stock out of
//! the catalog and put a row into the sales ledger, or do neither.
//!
//! ## The Atomic Unit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  sell(item_id, quantity, cashier_id)                                │
//! │                                                                     │
//! │  quantity <= 0 ───────────────────────► Rejected(InvalidQuantity)   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  BEGIN TRANSACTION                                                  │
//! │       │                                                             │
//! │  UPDATE items SET quantity = quantity - ?                           │
//! │   WHERE id = ? AND quantity >= ?        ← check + decrement are     │
//! │       │                                   ONE statement             │
//! │       ├── 0 rows ──► read item ──► ROLLBACK                         │
//! │       │                 ├── none ─────► Rejected(ItemNotFound)      │
//! │       │                 └── short ────► Rejected(InsufficientStock) │
//! │       ▼                                                             │
//! │  INSERT INTO sold_records (...)                                     │
//! │       │                                                             │
//! │  COMMIT ──► Committed(record)                                       │
//! │       │                                                             │
//! │       └── any storage error ──► ROLLBACK ──► Err(DbError)           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why the Conditional Update
//! A read-then-write ("is there enough? then subtract") lets two concurrent
//! sells both pass the check and drive stock negative. The single
//! `WHERE quantity >= ?` statement makes the availability check and the
//! decrement one atomic read-modify-write: at most one of two competing
//! sells for the last units can succeed, and `quantity >= 0` holds after
//! every committed transaction.
//!
//! Rejections never touch storage. Storage failures surface as
//! `Err(DbError)` with the transaction rolled back; the caller decides
//! whether to retry, this coordinator never does.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::repository::item::ItemRepository;
use crate::repository::sale::SaleRepository;
use tally_core::{RejectReason, SaleOutcome};

/// Coordinates the stock-decrement + ledger-append atomic unit.
///
/// ## Usage
/// ```rust,ignore
/// match db.checkout().sell(item_id, 3, cashier_id).await? {
///     SaleOutcome::Committed { record } => println!("sold, sale #{}", record.id),
///     SaleOutcome::Rejected { reason } => println!("no sale: {reason:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Checkout {
    pool: SqlitePool,
}

impl Checkout {
    /// Creates a new Checkout coordinator.
    pub fn new(pool: SqlitePool) -> Self {
        Checkout { pool }
    }

    /// Sells `quantity` units of `item_id`, stamped with `cashier_id`.
    ///
    /// Per invocation: `Started -> {Rejected | Committed | Err}`, all
    /// terminal. No intermediate state is observable outside the
    /// transaction.
    pub async fn sell(
        &self,
        item_id: i64,
        quantity: i64,
        cashier_id: i64,
    ) -> DbResult<SaleOutcome> {
        debug!(item_id, quantity, cashier_id, "Checkout started");

        // Non-positive quantities never reach storage.
        if quantity <= 0 {
            warn!(item_id, quantity, "Rejected sale: non-positive quantity");
            return Ok(SaleOutcome::Rejected {
                reason: RejectReason::InvalidQuantity {
                    requested: quantity,
                },
            });
        }

        let mut tx = self.pool.begin().await?;

        let affected = ItemRepository::decrement(&mut tx, item_id, quantity).await?;

        if affected == 0 {
            // Nothing was decremented: either the item is unknown or stock
            // is short. Look once to tell the caller which, then roll back.
            let existing = ItemRepository::get_by_id_in_tx(&mut tx, item_id).await?;
            tx.rollback().await?;

            let reason = match existing {
                None => {
                    warn!(item_id, "Rejected sale: item not found");
                    RejectReason::ItemNotFound { item_id }
                }
                Some(item) => {
                    warn!(
                        item_id,
                        available = item.quantity,
                        requested = quantity,
                        "Rejected sale: insufficient stock"
                    );
                    RejectReason::InsufficientStock {
                        name: item.name,
                        available: item.quantity,
                        requested: quantity,
                    }
                }
            };
            return Ok(SaleOutcome::Rejected { reason });
        }

        let record =
            SaleRepository::append_in_tx(&mut tx, item_id, quantity, cashier_id, Utc::now())
                .await?;

        // All-or-nothing: a failed commit leaves neither the decrement nor
        // the ledger row behind.
        tx.commit().await?;

        info!(
            sale_id = record.id,
            item_id, quantity, cashier_id, "Sale committed"
        );

        Ok(SaleOutcome::Committed { record })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # tally-db: Database Layer for Tally POS
//!
//! SQLite persistence for the catalog, the sales ledger, the user registry,
//! and the reporting queries, plus the one stateful operation in the whole
//! system: the checkout transaction.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Data Flow                          │
//! │                                                                     │
//! │  Caller (route handler / CLI / test)                                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    tally-db (THIS CRATE)                      │  │
//! │  │                                                               │  │
//! │  │  ┌────────────┐  ┌──────────────┐  ┌────────────────────┐     │  │
//! │  │  │  Database  │  │ Repositories │  │     Checkout       │     │  │
//! │  │  │ (pool.rs)  │  │ item / sale  │  │  the atomic unit:  │     │  │
//! │  │  │            │◄─│ user / report│◄─│  decrement + append│     │  │
//! │  │  └────────────┘  └──────────────┘  └────────────────────┘     │  │
//! │  │                                                               │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  ▼                                  │
//! │                      SQLite database file                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, sale, user, report)
//! - [`checkout`] - The sale transaction coordinator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/tally.db")).await?;
//!
//! let item = db.items().upsert(&draft).await?;
//! let outcome = db.checkout().sell(item.id, 3, cashier_id).await?;
//! let top = db.reports().top_selling(5).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::Checkout;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::item::ItemRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fixtures for the database tests: a fresh in-memory database
    //! per test, plus shorthand builders for drafts and staff rows.

    use crate::pool::{Database, DbConfig};
    use tally_core::{ItemDraft, Position, User};

    /// Fresh in-memory database with migrations applied.
    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database")
    }

    /// Inserts a cashier and returns the row.
    pub async fn seed_cashier(db: &Database, username: &str) -> User {
        db.users()
            .create(username, &format!("{username}@example.com"), Position::Cashier)
            .await
            .expect("seed cashier")
    }

    /// Catalog draft shorthand.
    pub fn draft(name: &str, category: &str, quantity: i64, price: i64, cost: i64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            unit: "ea".to_string(),
            category: category.to_string(),
            quantity,
            price_cents: price,
            cost_cents: cost,
        }
    }
}

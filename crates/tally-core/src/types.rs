//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │     Item      │   │  SaleRecord   │   │     User      │          │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │          │
//! │  │ id (i64)      │   │ id (i64)      │   │ id (i64)      │          │
//! │  │ name/category │   │ item_id (FK)  │   │ username      │          │
//! │  │ quantity      │   │ cashier (FK)  │   │ position      │          │
//! │  │ price/cost    │   │ quantity      │   └───────────────┘          │
//! │  └───────────────┘   └───────────────┘                              │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │  SaleOutcome  │   │ CatalogQuery  │   │ ReportFilter  │          │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │          │
//! │  │ Committed     │   │ All           │   │ SaleId        │          │
//! │  │ Rejected      │   │ Id / Name     │   │ NameContains  │          │
//! │  └───────────────┘   └───────────────┘   └───────────────┘          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identity is a plain `i64` AUTOINCREMENT key; a catalog line is also
//! addressable by its business key, the `(name, category)` pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Position
// =============================================================================

/// Staff position, the fixed role enumeration of the access layer.
///
/// The persistence core only ever reads this; authentication and
/// authorization decisions live with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Manager,
    Cashier,
    Admin,
}

impl Position {
    /// Stable lowercase name, matching the database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Position::Manager => "manager",
            Position::Cashier => "cashier",
            Position::Admin => "admin",
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalog line: one stocked product in one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier (AUTOINCREMENT).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit of measure ("kg", "ea", "litre", ...).
    pub unit: String,

    /// Category; `(name, category)` is the upsert key.
    pub category: String,

    /// Quantity on hand. Never negative after a committed transaction.
    pub quantity: i64,

    /// Selling price in cents.
    pub price_cents: i64,

    /// Cost price in cents (for profit calculations).
    pub cost_cents: i64,

    /// When the catalog line was first created.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Returns the selling price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the cost price as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Profit earned per unit sold at the current price and cost.
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.price() - self.cost()
    }

    /// Whether the requested quantity can be taken from stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.quantity >= quantity
    }

    /// Whether the item sits below the given scarcity threshold.
    #[inline]
    pub fn is_scarce(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }
}

/// Input fields for a catalog upsert.
///
/// `quantity` is a *delta*: an existing `(name, category)` line has it added
/// to its stock, a new line starts with it. Price and cost always take the
/// draft's values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub unit: String,
    pub category: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub cost_cents: i64,
}

// =============================================================================
// Sale Record
// =============================================================================

/// An immutable ledger row: one completed sale of one item by one cashier.
///
/// Append-only. Nothing in the application updates or deletes these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRecord {
    pub id: i64,
    pub item_id: i64,
    pub cashier_id: i64,
    /// Quantity sold, always positive.
    pub quantity: i64,
    pub sold_at: DateTime<Utc>,
}

// =============================================================================
// User
// =============================================================================

/// A staff identity referenced by the ledger's `cashier_id`.
///
/// Credentials and sessions are owned by the (out-of-scope) auth layer;
/// this is only what the core needs for referential integrity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub position: Position,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Outcome
// =============================================================================

/// Terminal result of one checkout invocation.
///
/// ```text
/// Started ──► Committed(record)      stock decremented + ledger row, atomically
///        ├──► Rejected(reason)       no mutation at all
///        └──► Err(DbError)           storage failure, transaction rolled back
/// ```
///
/// Rejections are values, not errors: a sale that cannot proceed for a
/// business reason is an expected outcome the caller renders to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SaleOutcome {
    /// Stock was decremented and the ledger row written, atomically.
    Committed { record: SaleRecord },
    /// No mutation occurred.
    Rejected { reason: RejectReason },
}

impl SaleOutcome {
    /// True when the sale committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, SaleOutcome::Committed { .. })
    }

    /// The committed ledger row, if any.
    pub fn record(&self) -> Option<&SaleRecord> {
        match self {
            SaleOutcome::Committed { record } => Some(record),
            SaleOutcome::Rejected { .. } => None,
        }
    }
}

/// Why a sale was rejected without touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RejectReason {
    /// Requested quantity was zero or negative.
    InvalidQuantity { requested: i64 },
    /// No catalog line with that id.
    ItemNotFound { item_id: i64 },
    /// Stock on hand is lower than the requested quantity.
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },
}

// =============================================================================
// Catalog Query
// =============================================================================

/// A parsed catalog search: numeric input looks up by id, anything else is
/// a case-insensitive name substring, empty input lists everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Empty input: list the whole catalog.
    All,
    /// Input parsed as an integer: exact id match.
    Id(i64),
    /// Substring match on the item name.
    Name(String),
}

impl CatalogQuery {
    /// Parses raw search input.
    ///
    /// ```rust
    /// use tally_core::types::CatalogQuery;
    ///
    /// assert_eq!(CatalogQuery::parse("42"), CatalogQuery::Id(42));
    /// assert_eq!(CatalogQuery::parse(" wid "), CatalogQuery::Name("wid".into()));
    /// assert_eq!(CatalogQuery::parse(""), CatalogQuery::All);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return CatalogQuery::All;
        }
        match raw.parse::<i64>() {
            Ok(id) => CatalogQuery::Id(id),
            Err(_) => CatalogQuery::Name(raw.to_string()),
        }
    }
}

// =============================================================================
// Reporting
// =============================================================================

/// Optional narrowing of the sales/profit report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFilter {
    /// Exact sale id match.
    SaleId(i64),
    /// Case-insensitive substring on the item name.
    NameContains(String),
}

impl ReportFilter {
    /// Parses raw filter input; empty input means no filter.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<i64>() {
            Ok(id) => Some(ReportFilter::SaleId(id)),
            Err(_) => Some(ReportFilter::NameContains(raw.to_string())),
        }
    }
}

/// One row of the top-selling report: an item with its lifetime totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopSeller {
    pub item_name: String,
    pub total_quantity: i64,
    pub total_profit_cents: i64,
}

impl TopSeller {
    #[inline]
    pub fn total_profit(&self) -> Money {
        Money::from_cents(self.total_profit_cents)
    }
}

/// One row of the per-sale revenue/profit breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleProfitRow {
    pub sale_id: i64,
    pub item_name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// price × quantity
    pub revenue_cents: i64,
    /// (price − cost) × quantity
    pub profit_cents: i64,
}

impl SaleProfitRow {
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }

    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, price_cents: i64, cost_cents: i64) -> Item {
        Item {
            id: 1,
            name: "Sugar".to_string(),
            unit: "kg".to_string(),
            category: "Grocery".to_string(),
            quantity,
            price_cents,
            cost_cents,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_position_as_str() {
        assert_eq!(Position::Manager.as_str(), "manager");
        assert_eq!(Position::Cashier.as_str(), "cashier");
        assert_eq!(Position::Admin.as_str(), "admin");
    }

    #[test]
    fn test_item_margin_and_can_sell() {
        let it = item(5, 1000, 600);
        assert_eq!(it.unit_margin().cents(), 400);
        assert!(it.can_sell(5));
        assert!(!it.can_sell(6));
        assert!(!it.can_sell(0));
        assert!(!it.can_sell(-1));
    }

    #[test]
    fn test_item_is_scarce() {
        assert!(item(9, 100, 50).is_scarce(10));
        assert!(!item(10, 100, 50).is_scarce(10));
    }

    #[test]
    fn test_catalog_query_parse() {
        assert_eq!(CatalogQuery::parse("42"), CatalogQuery::Id(42));
        assert_eq!(CatalogQuery::parse("  42  "), CatalogQuery::Id(42));
        assert_eq!(
            CatalogQuery::parse("wid"),
            CatalogQuery::Name("wid".to_string())
        );
        assert_eq!(CatalogQuery::parse(""), CatalogQuery::All);
        assert_eq!(CatalogQuery::parse("   "), CatalogQuery::All);
        // Mixed input is a name, not an id.
        assert_eq!(
            CatalogQuery::parse("42nd Street Cola"),
            CatalogQuery::Name("42nd Street Cola".to_string())
        );
    }

    #[test]
    fn test_report_filter_parse() {
        assert_eq!(ReportFilter::parse("7"), Some(ReportFilter::SaleId(7)));
        assert_eq!(
            ReportFilter::parse("cola"),
            Some(ReportFilter::NameContains("cola".to_string()))
        );
        assert_eq!(ReportFilter::parse(""), None);
        assert_eq!(ReportFilter::parse("  "), None);
    }

    #[test]
    fn test_sale_outcome_helpers() {
        let record = SaleRecord {
            id: 1,
            item_id: 2,
            cashier_id: 3,
            quantity: 4,
            sold_at: Utc::now(),
        };
        let committed = SaleOutcome::Committed { record };
        assert!(committed.is_committed());
        assert_eq!(committed.record().map(|r| r.quantity), Some(4));

        let rejected = SaleOutcome::Rejected {
            reason: RejectReason::ItemNotFound { item_id: 9 },
        };
        assert!(!rejected.is_committed());
        assert!(rejected.record().is_none());
    }
}

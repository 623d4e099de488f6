//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the heart of Tally POS: all business rules as pure
//! functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Tally POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │            Caller (route handler / CLI / test harness)        │  │
//! │  │   upsert item ──► search ──► sell ──► reports                 │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │               ★ tally-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │   ┌──────────┐  ┌─────────┐  ┌──────────┐  ┌────────────┐     │  │
//! │  │   │  types   │  │  money  │  │  error   │  │ validation │     │  │
//! │  │   │ Item     │  │  Money  │  │ CoreErr  │  │   rules    │     │  │
//! │  │   │ Outcome  │  │  cents  │  │ ValidErr │  │   checks   │     │  │
//! │  │   └──────────┘  └─────────┘  └──────────┘  └────────────┘     │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                  tally-db (Database Layer)                    │  │
//! │  │        SQLite queries, migrations, checkout transaction       │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, SaleRecord, SaleOutcome, reports)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default low-stock threshold: items with quantity strictly below this are
/// flagged as scarce on the restock view.
///
/// Can be overridden per call; this is only the conventional default.
pub const DEFAULT_SCARCITY_THRESHOLD: i64 = 10;

/// Maximum quantity accepted for a single sale line.
///
/// Prevents accidental over-selling from a typo (e.g. 1000 instead of 10).
pub const MAX_SALE_QUANTITY: i64 = 999;

//! # Repository Module
//!
//! Database repository implementations for Tally POS.
//!
//! Each repository is a thin struct over the shared `SqlitePool` exposing a
//! typed API; SQL stays inside this module. Callers get repositories from
//! [`crate::Database`] accessors rather than constructing them directly.
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Catalog upsert, lookup, search, scarcity list
//! - [`sale::SaleRepository`] - Append-only sales ledger
//! - [`user::UserRepository`] - Staff identities referenced by the ledger
//! - [`report::ReportRepository`] - Read-only sales/profit aggregates

pub mod item;
pub mod report;
pub mod sale;
pub mod user;

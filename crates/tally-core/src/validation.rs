//! # Validation Module
//!
//! Input validation for Tally POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                          │
//! │                                                                 │
//! │  Layer 1: Caller (form / CLI argument parsing)                  │
//! │  ├── Basic format checks, immediate user feedback               │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: THIS MODULE - business rule validation                │
//! │  ├── Returns ValidationError values, never raises               │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 3: Database (SQLite)                                     │
//! │  ├── NOT NULL / CHECK / UNIQUE / foreign key constraints        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators return `Result` values the caller checks before touching
//! storage; nothing in here panics.

use crate::error::ValidationError;
use crate::types::ItemDraft;
use crate::MAX_SALE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field (name, unit, category, username).
///
/// ## Rules
/// - Must not be blank after trimming
/// - Must be at most 140 characters
pub fn validate_required_text(field: &'static str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 140 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 140,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// Empty is allowed (lists the whole catalog); the only rule is a length
/// cap so arbitrary caller input cannot balloon the LIKE pattern.
///
/// Returns the trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_SALE_QUANTITY (999)
pub fn validate_sale_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a restock delta for an upsert.
///
/// Zero is allowed (a pure price update); negative is not, because stock
/// only ever goes down through the checkout transaction.
pub fn validate_stock_delta(delta: i64) -> ValidationResult<()> {
    if delta < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount in cents.
///
/// Zero is allowed (free items, zero cost).
pub fn validate_money_cents(field: &'static str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a full catalog upsert draft: all fields required, delta and
/// prices non-negative.
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<()> {
    validate_required_text("name", &draft.name)?;
    validate_required_text("unit", &draft.unit)?;
    validate_required_text("category", &draft.category)?;
    validate_stock_delta(draft.quantity)?;
    validate_money_cents("price", draft.price_cents)?;
    validate_money_cents("cost_price", draft.cost_cents)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ItemDraft {
        ItemDraft {
            name: "Sugar".to_string(),
            unit: "kg".to_string(),
            category: "Grocery".to_string(),
            quantity: 5,
            price_cents: 1000,
            cost_cents: 600,
        }
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("name", "Sugar").is_ok());
        assert!(validate_required_text("name", "").is_err());
        assert!(validate_required_text("name", "   ").is_err());
        assert!(validate_required_text("name", &"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  wid  ").unwrap(), "wid");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(999).is_ok());

        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-1).is_err());
        assert!(validate_sale_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_stock_delta() {
        assert!(validate_stock_delta(0).is_ok());
        assert!(validate_stock_delta(50).is_ok());
        assert!(validate_stock_delta(-1).is_err());
    }

    #[test]
    fn test_validate_money_cents() {
        assert!(validate_money_cents("price", 0).is_ok());
        assert!(validate_money_cents("price", 1099).is_ok());
        assert!(validate_money_cents("price", -100).is_err());
    }

    #[test]
    fn test_validate_item_draft() {
        assert!(validate_item_draft(&draft()).is_ok());

        let mut blank_unit = draft();
        blank_unit.unit = " ".to_string();
        assert!(validate_item_draft(&blank_unit).is_err());

        let mut negative_cost = draft();
        negative_cost.cost_cents = -5;
        assert!(validate_item_draft(&negative_cost).is_err());

        let mut negative_delta = draft();
        negative_delta.quantity = -3;
        assert!(validate_item_draft(&negative_delta).is_err());
    }
}

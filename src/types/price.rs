//! Decimal parsing and display for prices and sizes.
//!
//! ## Scale Preservation
//!
//! `Decimal` remembers the scale it was parsed with, so `"10.50"` is
//! displayed as `"10.50"` and `"10"` as `"10"`. Snapshots publish exactly
//! the text the feed sent; nothing here normalizes trailing zeros.
//!
//! ## Examples
//!
//! ```
//! use level3_book::types::price::{parse_decimal, format_decimal};
//!
//! let price = parse_decimal("10.50").unwrap();
//! assert_eq!(format_decimal(&price), "10.50");
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::BookError;

/// Parse decimal text from a feed.
///
/// # Example
///
/// ```
/// use level3_book::types::price::parse_decimal;
///
/// assert!(parse_decimal("0.00000001").is_ok());
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(s: &str) -> Result<Decimal, BookError> {
    Decimal::from_str(s).map_err(|_| BookError::InvalidDecimal(s.to_string()))
}

/// Display text for a price or size, with its original scale.
#[inline]
pub fn format_decimal(d: &Decimal) -> String {
    d.to_string()
}

/// Trimmed display text (trailing zeros removed).
///
/// Only for human-readable output; snapshots use [`format_decimal`].
///
/// # Example
///
/// ```
/// use level3_book::types::price::{parse_decimal, format_trimmed};
///
/// assert_eq!(format_trimmed(&parse_decimal("1.500").unwrap()), "1.5");
/// ```
pub fn format_trimmed(d: &Decimal) -> String {
    d.normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================

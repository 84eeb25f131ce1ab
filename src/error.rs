//! Error types for order book operations.
//!
//! An unknown order id is never an error: done, match and change events
//! for ids that are no longer resting are applied as no-ops.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by mutating order book operations.
///
/// Every error leaves the book exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Side text outside the accepted ask/bid spellings.
    #[error("invalid side: {0:?}")]
    InvalidSide(String),

    /// Fill size exceeds the order's remaining size.
    #[error("over-fill on order {order_id}: remaining {size}, fill {fill}")]
    OverFill {
        order_id: String,
        size: Decimal,
        fill: Decimal,
    },

    /// Open event with a non-positive price.
    #[error("invalid price for order {order_id}: {price}")]
    InvalidPrice { order_id: String, price: Decimal },

    /// Size that would leave a negative or empty resting order.
    #[error("invalid size for order {order_id}: {size}")]
    InvalidSize { order_id: String, size: Decimal },

    /// Decimal text that could not be parsed.
    #[error("invalid decimal: {0:?}")]
    InvalidDecimal(String),

    /// Feed line that does not decode as an event.
    #[error("invalid event: {0}")]
    InvalidEvent(String),
}

//! Order types for the level-3 book.
//!
//! ## Identity vs. Priority
//!
//! An order is identified by its `order_id`. Its priority within a side is
//! decided by `price` and then `time`; neither is ever mutated after the
//! open event, so an order never moves within its side. Only `size` changes
//! (match and change events).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BookError;

// ============================================================================
// Side enum
// ============================================================================

/// Book side of a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sell interest, best (lowest) price first
    Ask,
    /// Buy interest, best (highest) price first
    Bid,
}

impl Side {
    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Ask => "ask",
            Side::Bid => "bid",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = BookError;

    /// Parse raw side text from a feed.
    ///
    /// Accepts the book-side spellings (`ask`, `asks`, `bid`, `bids`) and
    /// the order-direction spellings venues publish (`sell`, `buy`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ask" | "asks" | "sell" => Ok(Side::Ask),
            "bid" | "bids" | "buy" => Ok(Side::Bid),
            other => Err(BookError::InvalidSide(other.to_string())),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// ## Example
///
/// ```
/// use level3_book::types::{Order, Side};
/// use rust_decimal::Decimal;
///
/// let order = Order::new("A1", Side::Ask, Decimal::from(10), Decimal::from(5), 1);
/// assert_eq!(order.side, Side::Ask);
/// assert_eq!(order.remaining_after(Decimal::from(2)), Ok(Decimal::from(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Venue-assigned identifier, unique among live orders
    pub order_id: String,

    /// Book side, fixed for the order's lifetime
    pub side: Side,

    /// Limit price, strictly positive
    pub price: Decimal,

    /// Remaining resting quantity
    pub size: Decimal,

    /// Arrival key used to break price ties (earlier first)
    pub time: u64,
}

impl Order {
    /// Create a new order
    pub fn new(
        order_id: impl Into<String>,
        side: Side,
        price: Decimal,
        size: Decimal,
        time: u64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            side,
            price,
            size,
            time,
        }
    }

    /// Check that the order may rest on the book.
    ///
    /// Price and size must both be strictly positive.
    pub fn validate(&self) -> Result<(), BookError> {
        if self.price <= Decimal::ZERO {
            return Err(BookError::InvalidPrice {
                order_id: self.order_id.clone(),
                price: self.price,
            });
        }
        if self.size <= Decimal::ZERO {
            return Err(BookError::InvalidSize {
                order_id: self.order_id.clone(),
                size: self.size,
            });
        }
        Ok(())
    }

    /// Size left after filling `fill`, without modifying the order.
    ///
    /// # Errors
    ///
    /// * `InvalidSize` - `fill` is negative
    /// * `OverFill` - `fill` exceeds the remaining size
    pub fn remaining_after(&self, fill: Decimal) -> Result<Decimal, BookError> {
        if fill < Decimal::ZERO {
            return Err(BookError::InvalidSize {
                order_id: self.order_id.clone(),
                size: fill,
            });
        }

        let remaining = self.size - fill;
        if remaining < Decimal::ZERO {
            return Err(BookError::OverFill {
                order_id: self.order_id.clone(),
                size: self.size,
                fill,
            });
        }
        Ok(remaining)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

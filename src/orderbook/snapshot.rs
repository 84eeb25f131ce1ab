//! Read-only projections of the book.
//!
//! ## Output Shape
//!
//! ```text
//! {
//!   "sequence": 42,
//!   "asks": [["A1", "10", "5"], ["A2", "10", "3"]],
//!   "bids": [["B2", "12", "1"]]
//! }
//! ```
//!
//! Each row is `[order_id, price, size]` in priority order. Price and size
//! keep the decimal text they were created with.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::price::format_decimal;
use crate::types::Order;

/// One projected order: `[order_id, price, size]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepthEntry(pub String, pub String, pub String);

impl DepthEntry {
    #[inline]
    pub fn order_id(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn price(&self) -> &str {
        &self.1
    }

    #[inline]
    pub fn size(&self) -> &str {
        &self.2
    }
}

impl From<&Order> for DepthEntry {
    fn from(order: &Order) -> Self {
        DepthEntry(
            order.order_id.clone(),
            format_decimal(&order.price),
            format_decimal(&order.size),
        )
    }
}

/// Full snapshot of both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Sequence recorded by the caller at the time of the snapshot
    pub sequence: u64,

    /// Ask side, best (lowest) first
    pub asks: Vec<DepthEntry>,

    /// Bid side, best (highest) first
    pub bids: Vec<DepthEntry>,
}

impl BookSnapshot {
    /// Encode as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// SHA-256 over the sequence and every row, as lowercase hex.
    ///
    /// Two books fed the same events produce the same checksum.
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.sequence.to_le_bytes());
        for (tag, rows) in [(b"asks", &self.asks), (b"bids", &self.bids)] {
            hasher.update(tag);
            for row in rows {
                hasher.update(row.order_id().as_bytes());
                hasher.update(b":");
                hasher.update(row.price().as_bytes());
                hasher.update(b":");
                hasher.update(row.size().as_bytes());
                hasher.update(b"|");
            }
        }

        hex::encode(hasher.finalize())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

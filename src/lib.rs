//! # Level-3 Book
//!
//! Per-order limit order book maintained from a venue's event feed.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Side, BookEvent)
//! - **OrderBook**: Two price-time ordered sides plus an id index
//! - **Snapshot**: `{sequence, asks, bids}` projection for publishers
//!
//! ## Design Principles
//!
//! 1. **Consistency**: The sides and the id index always hold the same orders
//! 2. **No Floating Point**: Prices and sizes are `rust_decimal::Decimal`
//! 3. **Race Tolerance**: Events for unknown ids are no-ops, not errors
//! 4. **Synchronous Execution**: No I/O and no async in any operation
//!
//! ## Example
//!
//! ```
//! use level3_book::{BookEvent, OrderBook, Side};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::new();
//! book.apply(BookEvent::open("A1", "ask", Decimal::from(10), Decimal::from(5), 1)).unwrap();
//! book.apply(BookEvent::open("A2", "ask", Decimal::from(10), Decimal::from(3), 2)).unwrap();
//!
//! let asks = book.depth(Side::Ask, 0);
//! assert_eq!(asks[0].order_id(), "A1");
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, BookEvent
pub mod types;

/// Order book: ordered sides, id index, snapshots
pub mod orderbook;

/// Book configuration
pub mod config;

/// Error taxonomy
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{BookEvent, Order, Side};
pub use orderbook::{BookSnapshot, DepthEntry, OrderBook, SharedOrderBook};
pub use config::BookConfig;
pub use error::BookError;

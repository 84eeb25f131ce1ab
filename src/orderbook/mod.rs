//! Order book module for the level-3 book.
//!
//! ## Architecture
//!
//! The book keeps every resting order individually, with:
//!
//! - **Slab-based storage**: one arena slot per live order
//! - **Ordered sides**: priority key to slab key, using `BTreeMap`
//! - **Id index**: order id to slab key, using `HashMap`
//! - **Price-time priority**: best price first, FIFO among equal prices
//!
//! ## Components
//!
//! - [`SidePriority`]: Ordering policy, one per side
//! - [`BookSide`]: Ordered container for one side
//! - [`OrderBook`]: Both sides plus the id index
//! - [`BookSnapshot`]: Serializable projection of the book
//! - [`SharedOrderBook`]: Single-writer, multi-reader handle
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Open | O(log n) |
//! | Done | O(log n) |
//! | Match / Change | O(1), O(log n) on removal |
//! | Lookup by id | O(1) |
//! | Depth (top k) | O(k) |

pub mod priority;
pub mod side;
pub mod book;
pub mod snapshot;
pub mod shared;

pub use priority::{AskPriority, BidPriority, PriorityKey, SidePriority};
pub use side::BookSide;
pub use book::OrderBook;
pub use snapshot::{BookSnapshot, DepthEntry};
pub use shared::SharedOrderBook;

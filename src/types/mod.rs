//! Core data types for the level-3 book
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Ask or Bid
//! - [`BookEvent`]: Feed event (open, done, match, change)
//!
//! ## Decimal Arithmetic
//!
//! Prices and sizes are `rust_decimal::Decimal`; see [`price`] for
//! parsing and display helpers.

mod order;
mod event;
pub mod price;

// Re-export all types at module level
pub use order::{Order, Side};
pub use event::{BookEvent, ChangeEvent, DoneEvent, MatchEvent, OpenEvent};

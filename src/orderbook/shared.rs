//! Shared handle for one writer and many readers.
//!
//! The feed task owns the only logical writer; publishers and query
//! handlers read through clones of the same handle. Each mutation holds
//! the write lock for its whole duration, so a reader never sees an order
//! present in the index but missing from its side, or the reverse.

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::config::BookConfig;
use crate::error::BookError;
use crate::orderbook::snapshot::{BookSnapshot, DepthEntry};
use crate::orderbook::OrderBook;
use crate::types::{BookEvent, Order, Side};

/// Cloneable, thread-safe handle to an [`OrderBook`].
///
/// ## Example
///
/// ```
/// use level3_book::orderbook::SharedOrderBook;
/// use level3_book::types::BookEvent;
/// use rust_decimal::Decimal;
///
/// let book = SharedOrderBook::default();
/// let reader = book.clone();
///
/// book.apply(BookEvent::open("A1", "ask", Decimal::from(10), Decimal::from(5), 1)).unwrap();
/// assert_eq!(reader.order_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedOrderBook {
    inner: Arc<RwLock<OrderBook>>,
}

impl SharedOrderBook {
    /// Wrap an existing book
    pub fn new(book: OrderBook) -> Self {
        Self {
            inner: Arc::new(RwLock::new(book)),
        }
    }

    /// Create an empty shared book from configuration
    pub fn from_config(config: &BookConfig) -> Self {
        Self::new(OrderBook::from_config(config))
    }

    // ========================================================================
    // Writer
    // ========================================================================

    /// Apply one feed event under the write lock
    pub fn apply(&self, event: BookEvent) -> Result<(), BookError> {
        self.inner.write().apply(event)
    }

    /// Apply an event and record its sequence under one write lock
    pub fn apply_sequenced(&self, sequence: u64, event: BookEvent) -> Result<(), BookError> {
        self.inner.write().apply_sequenced(sequence, event)
    }

    /// Add a resting order, replacing a live order with the same id
    pub fn add_order(&self, order: Order) -> Result<(), BookError> {
        self.inner.write().add_order(order)
    }

    /// Remove an order by id, returning it if it was live
    pub fn remove_by_order_id(&self, order_id: &str) -> Option<Order> {
        self.inner.write().remove_by_order_id(order_id)
    }

    /// Reduce an order by an executed quantity
    pub fn match_order(&self, order_id: &str, fill: Decimal) -> Result<(), BookError> {
        self.inner.write().match_order(order_id, fill)
    }

    /// Replace an order's remaining size
    pub fn change_order(&self, order_id: &str, new_size: Decimal) -> Result<(), BookError> {
        self.inner.write().change_order(order_id, new_size)
    }

    /// Record the feed sequence
    pub fn set_sequence(&self, sequence: u64) {
        self.inner.write().set_sequence(sequence);
    }

    /// Run `f` with exclusive access, e.g. to apply a batch atomically
    pub fn write<R>(&self, f: impl FnOnce(&mut OrderBook) -> R) -> R {
        f(&mut self.inner.write())
    }

    // ========================================================================
    // Readers
    // ========================================================================

    /// Copy of a live order
    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.inner.read().get_order(order_id).cloned()
    }

    /// Top `count` rows of one side (`0` = all)
    pub fn depth(&self, side: Side, count: usize) -> Vec<DepthEntry> {
        self.inner.read().depth(side, count)
    }

    /// Full snapshot of both sides
    pub fn snapshot(&self) -> BookSnapshot {
        self.inner.read().snapshot()
    }

    /// Number of live orders
    pub fn order_count(&self) -> usize {
        self.inner.read().order_count()
    }

    /// Last recorded sequence
    pub fn sequence(&self) -> u64 {
        self.inner.read().sequence()
    }

    /// Run `f` with shared access
    pub fn read<R>(&self, f: impl FnOnce(&OrderBook) -> R) -> R {
        f(&self.inner.read())
    }
}

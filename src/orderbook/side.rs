//! One side of the book, ordered by price-time priority.
//!
//! ## Design
//!
//! A `BookSide` holds no order data of its own. Each entry maps the
//! order's [`PriorityKey`] to its slab key; the order itself lives in the
//! book's slab, shared with the id index.
//!
//! ```text
//! best ──► (price, time, id) ─► slab key
//!          (price, time, id) ─► slab key
//! worst ─► (price, time, id) ─► slab key
//! ```

use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::orderbook::priority::{PriorityKey, SidePriority};
use crate::types::Order;

/// Ordered container of resting orders for one side.
#[derive(Debug)]
pub struct BookSide<P: SidePriority> {
    /// Priority key to slab key
    entries: BTreeMap<PriorityKey<P::PriceKey>, usize>,

    _policy: PhantomData<P>,
}

impl<P: SidePriority> Default for BookSide<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SidePriority> BookSide<P> {
    /// Create an empty side
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            _policy: PhantomData,
        }
    }

    /// Number of resting orders on this side
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the side is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an order stored under `key` in the slab.
    ///
    /// Returns the slab key previously stored for the same order, if any.
    pub fn insert(&mut self, order: &Order, key: usize) -> Option<usize> {
        debug_assert_eq!(order.side, P::SIDE);
        self.entries.insert(P::key(order), key)
    }

    /// Remove an order, returning its slab key
    pub fn remove(&mut self, order: &Order) -> Option<usize> {
        self.entries.remove(&P::key(order))
    }

    /// Slab key of the highest-priority order
    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.entries.values().next().copied()
    }

    /// Slab keys in priority order (best first)
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.values().copied()
    }

    /// Priority keys and slab keys in priority order
    pub fn iter(&self) -> impl Iterator<Item = (&PriorityKey<P::PriceKey>, usize)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

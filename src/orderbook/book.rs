//! Level-3 order book driven by feed events.
//!
//! ## Architecture
//!
//! - **Slab**: one slot per live order; the only owner of `Order` data
//! - **BookSide**: per-side priority key to slab key, in price-time order
//! - **HashMap**: order id to slab key, for lookup regardless of side
//!
//! Every mutation updates the slab, the side and the index together before
//! returning, so the side containers and the index always describe the
//! same set of live orders.
//!
//! ## Example
//!
//! ```
//! use level3_book::orderbook::OrderBook;
//! use level3_book::types::{Order, Side};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::with_capacity(1_000);
//!
//! book.add_order(Order::new("A1", Side::Ask, Decimal::from(10), Decimal::from(5), 1)).unwrap();
//! book.add_order(Order::new("B1", Side::Bid, Decimal::from(9), Decimal::from(2), 2)).unwrap();
//!
//! book.match_order("A1", Decimal::from(5)).unwrap();
//! assert!(book.get_order("A1").is_none());
//! assert_eq!(book.order_count(), 1);
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use slab::Slab;
use tracing::{debug, trace, warn};

use crate::config::BookConfig;
use crate::error::BookError;
use crate::orderbook::priority::{AskPriority, BidPriority, SidePriority};
use crate::orderbook::side::BookSide;
use crate::orderbook::snapshot::{BookSnapshot, DepthEntry};
use crate::types::{BookEvent, Order, Side};

/// Level-3 order book for a single instrument.
#[derive(Debug)]
pub struct OrderBook {
    /// Feed sequence, set by the caller
    sequence: u64,

    /// Live orders
    /// Key: slab index, Value: Order
    orders: Slab<Order>,

    /// Ask side (lowest price first, then earliest)
    asks: BookSide<AskPriority>,

    /// Bid side (highest price first, then earliest)
    bids: BookSide<BidPriority>,

    /// Order id to slab key
    index: HashMap<String, usize>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self {
            sequence: 0,
            orders: Slab::new(),
            asks: BookSide::new(),
            bids: BookSide::new(),
            index: HashMap::new(),
        }
    }

    /// Create a book with pre-allocated capacity
    ///
    /// # Example
    ///
    /// ```
    /// use level3_book::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            sequence: 0,
            orders: Slab::with_capacity(order_capacity),
            asks: BookSide::new(),
            bids: BookSide::new(),
            index: HashMap::with_capacity(order_capacity),
        }
    }

    /// Create a book from configuration
    pub fn from_config(config: &BookConfig) -> Self {
        Self::with_capacity(config.order_capacity)
    }

    // ========================================================================
    // Sequence
    // ========================================================================

    /// Last sequence recorded by the caller
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Record the feed sequence. The book never advances it on its own.
    #[inline]
    pub fn set_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Get the current capacity (pre-allocated slots)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Get the total number of live orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Get the number of resting asks
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    /// Get the number of resting bids
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    /// Check if the book is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // ========================================================================
    // Event Application
    // ========================================================================

    /// Apply one feed event.
    ///
    /// # Errors
    ///
    /// * `InvalidSide` - open event with unrecognised side text
    /// * `InvalidPrice` / `InvalidSize` - open event that cannot rest
    /// * `OverFill` - match larger than the remaining size
    ///
    /// Done, match and change events for unknown ids succeed as no-ops.
    pub fn apply(&mut self, event: BookEvent) -> Result<(), BookError> {
        match event {
            BookEvent::Open(open) => match open.to_order() {
                Ok(order) => self.add_order(order),
                Err(err) => {
                    warn!(order_id = %open.order_id, error = %err, "rejected open");
                    Err(err)
                }
            },
            BookEvent::Done(done) => {
                self.remove_by_order_id(&done.order_id);
                Ok(())
            }
            BookEvent::Match(fill) => self.match_order(&fill.order_id, fill.size),
            BookEvent::Change(change) => self.change_order(&change.order_id, change.new_size),
        }
    }

    /// Apply an event and, if it succeeds, record `sequence`.
    ///
    /// A rejected event leaves both the orders and the sequence untouched.
    pub fn apply_sequenced(&mut self, sequence: u64, event: BookEvent) -> Result<(), BookError> {
        self.apply(event)?;
        self.sequence = sequence;
        Ok(())
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Add a resting order (open event).
    ///
    /// An open for an id that is already live replaces the previous order.
    ///
    /// # Errors
    ///
    /// `InvalidPrice` or `InvalidSize` when price or size is not positive.
    pub fn add_order(&mut self, order: Order) -> Result<(), BookError> {
        if let Err(err) = order.validate() {
            warn!(order_id = %order.order_id, error = %err, "rejected open");
            return Err(err);
        }

        let existing = self.index.get(&order.order_id).copied();
        if let Some(key) = existing {
            warn!(order_id = %order.order_id, "open for live order id, replacing");
            self.remove_key(key);
        }

        let key = self.orders.insert(order);
        let order = &self.orders[key];
        match order.side {
            Side::Ask => self.asks.insert(order, key),
            Side::Bid => self.bids.insert(order, key),
        };
        self.index.insert(order.order_id.clone(), key);

        trace!(
            order_id = %order.order_id,
            side = %order.side,
            price = %order.price,
            size = %order.size,
            "order opened"
        );
        Ok(())
    }

    /// Remove an order by id (done event).
    ///
    /// Returns the removed order; an unknown id is a no-op returning `None`.
    pub fn remove_by_order_id(&mut self, order_id: &str) -> Option<Order> {
        match self.index.get(order_id).copied() {
            Some(key) => {
                let removed = self.remove_key(key);
                trace!(order_id, "order done");
                removed
            }
            None => {
                debug!(order_id, "done for unknown order, ignoring");
                None
            }
        }
    }

    /// Reduce an order's size by an executed quantity (match event).
    ///
    /// The order is removed when nothing remains. An unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// * `OverFill` - `fill` exceeds the remaining size; the order is unchanged
    /// * `InvalidSize` - `fill` is negative
    pub fn match_order(&mut self, order_id: &str, fill: Decimal) -> Result<(), BookError> {
        let Some(key) = self.index.get(order_id).copied() else {
            debug!(order_id, "match for unknown order, ignoring");
            return Ok(());
        };
        let Some(order) = self.orders.get_mut(key) else {
            return Ok(());
        };

        let remaining = match order.remaining_after(fill) {
            Ok(remaining) => remaining,
            Err(err) => {
                warn!(order_id, error = %err, "rejected match");
                return Err(err);
            }
        };

        if remaining.is_zero() {
            self.remove_key(key);
            trace!(order_id, %fill, "order fully matched");
        } else {
            order.size = remaining;
            trace!(order_id, %fill, %remaining, "order partially matched");
        }
        Ok(())
    }

    /// Replace an order's remaining size (change event).
    ///
    /// Unlike [`match_order`](Self::match_order) this sets the size outright.
    /// A new size of zero removes the order. An unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidSize` when `new_size` is negative; the order is unchanged.
    pub fn change_order(&mut self, order_id: &str, new_size: Decimal) -> Result<(), BookError> {
        let Some(key) = self.index.get(order_id).copied() else {
            debug!(order_id, "change for unknown order, ignoring");
            return Ok(());
        };

        if new_size < Decimal::ZERO {
            let err = BookError::InvalidSize {
                order_id: order_id.to_string(),
                size: new_size,
            };
            warn!(order_id, error = %err, "rejected change");
            return Err(err);
        }

        if new_size.is_zero() {
            self.remove_key(key);
            trace!(order_id, "order changed to zero");
        } else if let Some(order) = self.orders.get_mut(key) {
            order.size = new_size;
            trace!(order_id, %new_size, "order changed");
        }
        Ok(())
    }

    /// Unlink an order from its side, the index and the slab
    fn remove_key(&mut self, key: usize) -> Option<Order> {
        let order = self.orders.get(key)?;
        let unlinked = match order.side {
            Side::Ask => self.asks.remove(order),
            Side::Bid => self.bids.remove(order),
        };
        debug_assert_eq!(unlinked, Some(key), "side out of sync with index");

        let order = self.orders.remove(key);
        self.index.remove(&order.order_id);
        Some(order)
    }

    /// Clear all orders from the book. The sequence is kept.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.asks.clear();
        self.bids.clear();
        self.index.clear();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Get a live order by id
    #[inline]
    pub fn get_order(&self, order_id: &str) -> Option<&Order> {
        self.index
            .get(order_id)
            .and_then(|&key| self.orders.get(key))
    }

    /// Check if an order is live
    #[inline]
    pub fn contains_order(&self, order_id: &str) -> bool {
        self.index.contains_key(order_id)
    }

    /// Highest-priority ask (lowest price, earliest)
    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.front().and_then(|key| self.orders.get(key))
    }

    /// Highest-priority bid (highest price, earliest)
    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.front().and_then(|key| self.orders.get(key))
    }

    /// Asks in priority order
    pub fn asks(&self) -> impl Iterator<Item = &Order> + '_ {
        self.asks.keys().filter_map(move |key| self.orders.get(key))
    }

    /// Bids in priority order
    pub fn bids(&self) -> impl Iterator<Item = &Order> + '_ {
        self.bids.keys().filter_map(move |key| self.orders.get(key))
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Top `count` orders of one side in priority order (`0` = all).
    ///
    /// # Example
    ///
    /// ```
    /// use level3_book::orderbook::OrderBook;
    /// use level3_book::types::{Order, Side};
    /// use rust_decimal::Decimal;
    ///
    /// let mut book = OrderBook::new();
    /// book.add_order(Order::new("A1", Side::Ask, Decimal::from(10), Decimal::from(5), 1)).unwrap();
    /// book.add_order(Order::new("A2", Side::Ask, Decimal::from(11), Decimal::from(3), 2)).unwrap();
    ///
    /// let top = book.depth(Side::Ask, 1);
    /// assert_eq!(top.len(), 1);
    /// assert_eq!(top[0].order_id(), "A1");
    /// ```
    pub fn depth(&self, side: Side, count: usize) -> Vec<DepthEntry> {
        let limit = if count == 0 { usize::MAX } else { count };
        match side {
            Side::Ask => self.asks().take(limit).map(DepthEntry::from).collect(),
            Side::Bid => self.bids().take(limit).map(DepthEntry::from).collect(),
        }
    }

    /// [`depth`](Self::depth) for raw side text.
    ///
    /// # Errors
    ///
    /// `InvalidSide` when the side text is not recognised.
    pub fn depth_by_name(&self, side: &str, count: usize) -> Result<Vec<DepthEntry>, BookError> {
        let side: Side = side.parse()?;
        Ok(self.depth(side, count))
    }

    /// Full snapshot of both sides with the current sequence
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            sequence: self.sequence,
            asks: self.depth(Side::Ask, 0),
            bids: self.depth(Side::Bid, 0),
        }
    }

    /// Encode the full snapshot as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    // ========================================================================
    // Integrity
    // ========================================================================

    /// Check the structural invariants of the book.
    ///
    /// - the index holds exactly the orders on the two sides
    /// - no order is on both sides or on the wrong side
    /// - each side iterates in strict price-time order
    /// - every live order has a positive size
    pub fn is_consistent(&self) -> bool {
        let linked = self.asks.len() + self.bids.len();
        if self.index.len() != linked || self.orders.len() != linked {
            return false;
        }

        for (order_id, &key) in &self.index {
            match self.orders.get(key) {
                Some(order) if order.order_id == *order_id && order.size > Decimal::ZERO => {}
                _ => return false,
            }
        }

        self.side_linked(&self.asks)
            && self.side_linked(&self.bids)
            && is_sorted::<AskPriority>(&self.asks().collect::<Vec<_>>())
            && is_sorted::<BidPriority>(&self.bids().collect::<Vec<_>>())
    }

    /// Every entry of `side` points at an indexed order of that side, and
    /// its priority key still matches the stored order
    fn side_linked<P: SidePriority>(&self, side: &BookSide<P>) -> bool {
        side.iter().all(|(priority, key)| match self.orders.get(key) {
            Some(order) => {
                order.side == P::SIDE
                    && *priority == P::key(order)
                    && self.index.get(priority.order_id()) == Some(&key)
            }
            None => false,
        })
    }
}

fn is_sorted<P: SidePriority>(orders: &[&Order]) -> bool {
    orders
        .windows(2)
        .all(|pair| P::compare(pair[0], pair[1]).is_lt())
}

impl Serialize for OrderBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

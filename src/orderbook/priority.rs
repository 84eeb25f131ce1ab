//! Price-time priority policy for each side of the book.
//!
//! ## Ordering
//!
//! - **Asks**: price ascending (lowest first)
//! - **Bids**: price descending (highest first), via `Reverse<Decimal>`
//! - **Ties**: equal prices order by `time` ascending (first arrival first)
//!
//! ## Identity
//!
//! The sort key ends with the `order_id`, so two orders with identical
//! price and time remain distinct entries, and removing one by key never
//! touches the other.

use std::cmp::{Ordering, Reverse};
use std::fmt;

use rust_decimal::Decimal;

use crate::types::{Order, Side};

/// Sort key of an order within one side.
///
/// Field order matters: the derived `Ord` compares `price`, then `time`,
/// then `order_id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityKey<K> {
    price: K,
    time: u64,
    order_id: String,
}

impl<K> PriorityKey<K> {
    /// Identifier of the keyed order
    #[inline]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }
}

/// Ordering policy for one side of the book.
///
/// Implemented by [`AskPriority`] and [`BidPriority`]; the side container
/// is generic over this trait and is instantiated once per side.
pub trait SidePriority: fmt::Debug {
    /// Price component of the key, ordered best-first
    type PriceKey: Ord + Clone + fmt::Debug;

    /// The side this policy orders
    const SIDE: Side;

    /// Map a price onto its best-first key
    fn price_key(price: Decimal) -> Self::PriceKey;

    /// Full sort key for an order
    fn key(order: &Order) -> PriorityKey<Self::PriceKey> {
        PriorityKey {
            price: Self::price_key(order.price),
            time: order.time,
            order_id: order.order_id.clone(),
        }
    }

    /// Compare two orders by priority (`Less` = `a` ranks ahead of `b`).
    ///
    /// Orders with equal price and time but different ids compare by id,
    /// which only keeps them distinct; it carries no priority meaning.
    fn compare(a: &Order, b: &Order) -> Ordering {
        Self::price_key(a.price)
            .cmp(&Self::price_key(b.price))
            .then(a.time.cmp(&b.time))
            .then_with(|| a.order_id.cmp(&b.order_id))
    }
}

/// Ask side: lowest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct AskPriority;

impl SidePriority for AskPriority {
    type PriceKey = Decimal;
    const SIDE: Side = Side::Ask;

    #[inline]
    fn price_key(price: Decimal) -> Decimal {
        price
    }
}

/// Bid side: highest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct BidPriority;

impl SidePriority for BidPriority {
    type PriceKey = Reverse<Decimal>;
    const SIDE: Side = Side::Bid;

    #[inline]
    fn price_key(price: Decimal) -> Reverse<Decimal> {
        Reverse(price)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

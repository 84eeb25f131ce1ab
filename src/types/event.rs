//! Feed events that drive the book.
//!
//! ## Wire Shape
//!
//! Events are internally tagged by `type`:
//!
//! ```text
//! {"type":"open",  "order_id":"A1","side":"ask","price":"10","size":"5","time":1}
//! {"type":"done",  "order_id":"A1"}
//! {"type":"match", "order_id":"A1","size":"2"}
//! {"type":"change","order_id":"A1","new_size":"4"}
//! ```
//!
//! Prices and sizes must be JSON strings. They are parsed as decimal text
//! so the scale the venue sent is what snapshots publish; a JSON number
//! has already lost that text and is rejected. Unparseable text is
//! reported as `InvalidDecimal`.
//!
//! `side` stays raw text until the event is applied so that an unknown
//! side is reported as `InvalidSide` by the book rather than as a decode
//! failure.

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::BookError;
use crate::types::price::parse_decimal;
use crate::types::{Order, Side};

/// A lifecycle event for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BookEvent {
    /// New resting order
    Open(OpenEvent),
    /// Order left the book (cancelled or fully executed)
    Done(DoneEvent),
    /// Partial or full execution against the resting order
    Match(MatchEvent),
    /// Absolute replacement of the remaining size
    Change(ChangeEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenEvent {
    pub order_id: String,
    pub side: String,
    pub price: Decimal,
    pub size: Decimal,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoneEvent {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEvent {
    pub order_id: String,
    /// Executed quantity
    pub size: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub order_id: String,
    pub new_size: Decimal,
}

/// Wire shape with decimals still as text
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawEvent {
    Open {
        order_id: String,
        side: String,
        price: String,
        size: String,
        time: u64,
    },
    Done {
        order_id: String,
    },
    Match {
        order_id: String,
        size: String,
    },
    Change {
        order_id: String,
        new_size: String,
    },
}

impl TryFrom<RawEvent> for BookEvent {
    type Error = BookError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let event = match raw {
            RawEvent::Open {
                order_id,
                side,
                price,
                size,
                time,
            } => BookEvent::Open(OpenEvent {
                order_id,
                side,
                price: parse_decimal(&price)?,
                size: parse_decimal(&size)?,
                time,
            }),
            RawEvent::Done { order_id } => BookEvent::Done(DoneEvent { order_id }),
            RawEvent::Match { order_id, size } => BookEvent::Match(MatchEvent {
                order_id,
                size: parse_decimal(&size)?,
            }),
            RawEvent::Change { order_id, new_size } => BookEvent::Change(ChangeEvent {
                order_id,
                new_size: parse_decimal(&new_size)?,
            }),
        };
        Ok(event)
    }
}

impl<'de> Deserialize<'de> for BookEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEvent::deserialize(deserializer)?;
        BookEvent::try_from(raw).map_err(de::Error::custom)
    }
}

impl OpenEvent {
    /// Build the order this event opens.
    ///
    /// Fails with `InvalidSide` when the side text is not recognised.
    pub fn to_order(&self) -> Result<Order, BookError> {
        let side: Side = self.side.parse()?;
        Ok(Order::new(
            self.order_id.clone(),
            side,
            self.price,
            self.size,
            self.time,
        ))
    }
}

impl BookEvent {
    /// Decode one feed line.
    ///
    /// # Errors
    ///
    /// * `InvalidDecimal` - a price or size that is not decimal text
    /// * `InvalidEvent` - anything else that does not match the wire shape
    pub fn from_json(line: &str) -> Result<Self, BookError> {
        let raw: RawEvent =
            serde_json::from_str(line).map_err(|e| BookError::InvalidEvent(e.to_string()))?;
        BookEvent::try_from(raw)
    }

    pub fn open(
        order_id: impl Into<String>,
        side: impl Into<String>,
        price: Decimal,
        size: Decimal,
        time: u64,
    ) -> Self {
        BookEvent::Open(OpenEvent {
            order_id: order_id.into(),
            side: side.into(),
            price,
            size,
            time,
        })
    }

    pub fn done(order_id: impl Into<String>) -> Self {
        BookEvent::Done(DoneEvent {
            order_id: order_id.into(),
        })
    }

    pub fn fill(order_id: impl Into<String>, size: Decimal) -> Self {
        BookEvent::Match(MatchEvent {
            order_id: order_id.into(),
            size,
        })
    }

    pub fn change(order_id: impl Into<String>, new_size: Decimal) -> Self {
        BookEvent::Change(ChangeEvent {
            order_id: order_id.into(),
            new_size,
        })
    }

    /// Identifier of the order this event targets
    pub fn order_id(&self) -> &str {
        match self {
            BookEvent::Open(e) => &e.order_id,
            BookEvent::Done(e) => &e.order_id,
            BookEvent::Match(e) => &e.order_id,
            BookEvent::Change(e) => &e.order_id,
        }
    }

    /// Lowercase event type, as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            BookEvent::Open(_) => "open",
            BookEvent::Done(_) => "done",
            BookEvent::Match(_) => "match",
            BookEvent::Change(_) => "change",
        }
    }
}

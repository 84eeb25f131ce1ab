//! Book configuration.

use serde::{Deserialize, Serialize};

/// Default number of order slots reserved up front
pub const DEFAULT_ORDER_CAPACITY: usize = 1024;

/// Configuration for a single instrument's book.
///
/// Deserializes from JSON; missing fields take their defaults.
///
/// ```
/// use level3_book::BookConfig;
///
/// let config: BookConfig = serde_json::from_str(r#"{"order_capacity": 50000}"#).unwrap();
/// assert_eq!(config.order_capacity, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Orders to pre-allocate in the slab and id index.
    /// The book grows past this when needed.
    pub order_capacity: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
        }
    }
}

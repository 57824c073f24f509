//! Order value type and kind/side vocabulary for the matching engine.

use common::time::Nanos;
use common::{OrderId, Price, Qty, Side};

/// The kind of an incoming order.
///
/// Only `Limit` and `Market` have defined matching behavior in this
/// engine. `Trigger` is recognized so callers can construct the variant,
/// but `OrderBook::place_order` rejects it outright
/// (`EngineError::UnsupportedKind`) rather than guessing at
/// activation/resting semantics the source never specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKind {
    Limit,
    Market,
    Trigger,
}

/// A single order, mutable while it is active.
///
/// `quantity` is decremented in place by matches against it: this is how
/// a caller observes partial fills, and how a market order communicates
/// its unfilled residual back out of `place_order`.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: OrderId,
    /// Monotonically non-decreasing event time, audit-only. FIFO arrival
    /// order within a price level is enforced by insertion order, not by
    /// this field.
    pub timestamp: Nanos,
    pub kind: OrderKind,
    pub side: Side,
    /// `Some` for `Limit`, ignored (and typically `None`) for `Market`.
    pub price: Option<Price>,
    pub quantity: Qty,
    /// Opaque audit field; never interpreted by the engine.
    pub client: String,
}

impl Order {
    pub fn new_limit(
        order_id: OrderId,
        timestamp: Nanos,
        side: Side,
        price: Price,
        quantity: Qty,
        client: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            timestamp,
            kind: OrderKind::Limit,
            side,
            price: Some(price),
            quantity,
            client: client.into(),
        }
    }

    pub fn new_market(
        order_id: OrderId,
        timestamp: Nanos,
        side: Side,
        quantity: Qty,
        client: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            timestamp,
            kind: OrderKind::Market,
            side,
            price: None,
            quantity,
            client: client.into(),
        }
    }

    /// True once matching has fully consumed this order's quantity.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }
}

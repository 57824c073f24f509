//! Single-instrument price-time priority order book.

use std::collections::HashMap;
use std::sync::Arc;

use common::logging::{LogLevel, Logger};
use common::{OrderId, Price, Qty, Side};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::order::{Order, OrderKind};
use crate::side_book::{Ask, Bid, SideBook, SideKind};

/// Dispatches side-book operations without knowing whether the concrete
/// side is `SideBook<Bid>` or `SideBook<Ask>`, so the matching loop can
/// pick "the opposite book" at runtime instead of duplicating itself per
/// side.
trait AnySideBook {
    fn add(&mut self, order: Order);
    fn delete_order(&mut self, price: Price, order_id: OrderId);
    fn decrease_best_quantity(&mut self, price: Price, delta: Qty);
    fn get_best_order(&mut self) -> Option<&Order>;
}

impl<S: SideKind> AnySideBook for SideBook<S> {
    fn add(&mut self, order: Order) {
        SideBook::add(self, order)
    }

    fn delete_order(&mut self, price: Price, order_id: OrderId) {
        SideBook::delete_order(self, price, order_id)
    }

    fn decrease_best_quantity(&mut self, price: Price, delta: Qty) {
        SideBook::decrease_best_quantity(self, price, delta)
    }

    fn get_best_order(&mut self) -> Option<&Order> {
        SideBook::get_best_order(self)
    }
}

/// Where a resting order currently lives, so `cancel_order` can find it
/// in O(1) instead of scanning both sides.
#[derive(Clone, Copy)]
struct Resting {
    side: Side,
    price: Price,
}

/// A single-instrument limit order book with price-time priority
/// matching.
///
/// `place_order` and `cancel_order` are synchronous and must be
/// serialized by the caller; the book performs no locking or threading
/// of its own.
pub struct OrderBook {
    bid: SideBook<Bid>,
    ask: SideBook<Ask>,
    resting: HashMap<OrderId, Resting>,
    logger: Option<Arc<Logger>>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            bid: SideBook::with_capacity(config.expected_price_levels),
            ask: SideBook::with_capacity(config.expected_price_levels),
            resting: HashMap::with_capacity(config.expected_resting_orders),
            logger: None,
        }
    }

    /// Attaches a background logger for accept/reject/match/cancel
    /// events. Purely observational; matching behavior is identical
    /// with or without one attached.
    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Validates, matches, and (for any unfilled limit residual) rests
    /// `order`. `order.quantity` is mutated in place to reflect whatever
    /// is left after matching; a fully-filled or fully-discarded order
    /// ends at zero.
    ///
    /// Rejects before touching any state: a failed call leaves the book
    /// exactly as it was.
    pub fn place_order(&mut self, order: &mut Order) -> Result<(), EngineError> {
        if let Err(err) = self.validate(order) {
            if let Some(logger) = &self.logger {
                logger.log_with_u64(LogLevel::Warn, "place_order rejected", order.order_id);
            }
            return Err(err);
        }

        if let Some(logger) = &self.logger {
            logger.log_with_u64(LogLevel::Debug, "place_order accepted", order.order_id);
        }

        self.match_order(order);

        if order.kind == OrderKind::Market && order.quantity > 0 {
            if let Some(logger) = &self.logger {
                logger.log_with_u64(
                    LogLevel::Warn,
                    "market order residual discarded",
                    order.quantity,
                );
            }
        }

        if order.kind == OrderKind::Limit && order.quantity > 0 {
            self.rest(order.clone());
        }

        Ok(())
    }

    /// Removes a resting order. A no-op, not an error, if `order_id`
    /// isn't currently resting (already filled, already cancelled, or
    /// never placed).
    pub fn cancel_order(&mut self, order_id: OrderId) {
        if let Some(resting) = self.resting.remove(&order_id) {
            self.home_book(resting.side).delete_order(resting.price, order_id);
            if let Some(logger) = &self.logger {
                logger.log_with_u64(LogLevel::Debug, "order cancelled", order_id);
            }
        }
    }

    pub fn get_best_bid_order(&mut self) -> Option<&Order> {
        self.bid.get_best_order()
    }

    pub fn get_best_ask_order(&mut self) -> Option<&Order> {
        self.ask.get_best_order()
    }

    pub fn get_best_bid_price(&mut self) -> Option<Price> {
        self.bid.get_best_price()
    }

    pub fn get_best_ask_price(&mut self) -> Option<Price> {
        self.ask.get_best_price()
    }

    pub fn get_quantity_for_price(&self, side: Side, price: Price) -> Qty {
        match side {
            Side::Bid => self.bid.get_quantity_for_price(price),
            Side::Ask => self.ask.get_quantity_for_price(price),
        }
    }

    fn validate(&self, order: &Order) -> Result<(), EngineError> {
        if order.kind == OrderKind::Trigger {
            return Err(EngineError::UnsupportedKind(order.kind));
        }
        if order.quantity == 0 {
            return Err(EngineError::NonPositiveQuantity);
        }
        if order.kind == OrderKind::Limit {
            match order.price {
                None => return Err(EngineError::MissingPrice),
                Some(p) if p <= 0 => return Err(EngineError::NonPositivePrice),
                Some(_) => {}
            }
        }
        if self.resting.contains_key(&order.order_id) {
            return Err(EngineError::DuplicateOrderId(order.order_id));
        }
        Ok(())
    }

    /// Walks the opposite side's best price while the incoming order
    /// still has quantity and still crosses, executing one trade per
    /// iteration.
    fn match_order(&mut self, order: &mut Order) {
        loop {
            if order.quantity == 0 {
                break;
            }

            let best = match self.opposite_book(order.side).get_best_order() {
                Some(b) => (b.order_id, b.price, b.quantity),
                None => break,
            };
            let (best_id, best_price, best_qty) = best;
            let best_price = best_price.expect("resting order without a price");

            if order.kind == OrderKind::Limit {
                let incoming_price = order.price.expect("validated limit order has a price");
                let crosses = match order.side {
                    Side::Bid => Bid::crosses(incoming_price, best_price),
                    Side::Ask => Ask::crosses(incoming_price, best_price),
                };
                if !crosses {
                    break;
                }
            }

            let trade_qty = order.quantity.min(best_qty);
            if order.quantity >= best_qty {
                self.opposite_book(order.side).delete_order(best_price, best_id);
                self.resting.remove(&best_id);
            } else {
                self.opposite_book(order.side)
                    .decrease_best_quantity(best_price, trade_qty);
            }
            order.quantity -= trade_qty;

            if let Some(logger) = &self.logger {
                logger.log_with_u64(LogLevel::Debug, "order matched against resting id", best_id);
            }
        }
    }

    fn rest(&mut self, order: Order) {
        let order_id = order.order_id;
        let side = order.side;
        let price = order.price.expect("limit order resting without a price");
        self.resting.insert(order_id, Resting { side, price });
        self.home_book(side).add(order);
    }

    fn home_book(&mut self, side: Side) -> &mut dyn AnySideBook {
        match side {
            Side::Bid => &mut self.bid,
            Side::Ask => &mut self.ask,
        }
    }

    fn opposite_book(&mut self, side: Side) -> &mut dyn AnySideBook {
        match side {
            Side::Bid => &mut self.ask,
            Side::Ask => &mut self.bid,
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

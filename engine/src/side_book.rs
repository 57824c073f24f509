//! One side of the book: a price -> FIFO map plus a lazily-cleaned
//! best-price heap.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use common::{OrderId, Price, Qty};

use crate::order::Order;
use crate::price_level::PriceLevelQueue;

/// Parameterizes `SideBook` over bid/ask without subclassing: the two
/// sides differ only in how their heap key orders prices and which
/// direction an incoming order has to cross to trade.
pub trait SideKind {
    type HeapKey: Ord + Copy;

    fn heap_key(price: Price) -> Self::HeapKey;
    fn price_of(key: Self::HeapKey) -> Price;

    /// Whether an order priced at `incoming_price` crosses a resting
    /// order priced at `resting_price`, on this incoming side.
    fn crosses(incoming_price: Price, resting_price: Price) -> bool;
}

/// Bid side: best price is the maximum, and `BinaryHeap` is already a
/// max-heap, so the raw price works as the heap key.
pub struct Bid;

impl SideKind for Bid {
    type HeapKey = Price;

    #[inline]
    fn heap_key(price: Price) -> Price {
        price
    }

    #[inline]
    fn price_of(key: Price) -> Price {
        key
    }

    #[inline]
    fn crosses(incoming_price: Price, resting_price: Price) -> bool {
        incoming_price >= resting_price
    }
}

/// Ask side: best price is the minimum, so the key is wrapped in
/// `Reverse` to turn the max-heap into a min-heap.
pub struct Ask;

impl SideKind for Ask {
    type HeapKey = Reverse<Price>;

    #[inline]
    fn heap_key(price: Price) -> Reverse<Price> {
        Reverse(price)
    }

    #[inline]
    fn price_of(key: Reverse<Price>) -> Price {
        key.0
    }

    #[inline]
    fn crosses(incoming_price: Price, resting_price: Price) -> bool {
        incoming_price <= resting_price
    }
}

/// All resting orders on one side of the book.
///
/// `price_heap` is allowed to contain stale entries for prices that have
/// since emptied out; they are popped lazily, on read, rather than kept
/// in sync on every removal.
pub struct SideBook<S: SideKind> {
    price_to_list: HashMap<Price, PriceLevelQueue>,
    price_to_quantity: HashMap<Price, Qty>,
    price_heap: BinaryHeap<S::HeapKey>,
}

impl<S: SideKind> SideBook<S> {
    pub fn new() -> Self {
        Self {
            price_to_list: HashMap::new(),
            price_to_quantity: HashMap::new(),
            price_heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(levels: usize) -> Self {
        Self {
            price_to_list: HashMap::with_capacity(levels),
            price_to_quantity: HashMap::with_capacity(levels),
            price_heap: BinaryHeap::with_capacity(levels),
        }
    }

    /// Appends `order` to its price level, creating the level (and pushing
    /// a fresh heap entry) if this is the first order resting there.
    pub fn add(&mut self, order: Order) {
        let price = order
            .price
            .expect("add() requires a limit order carrying a price");
        let qty = order.quantity;
        match self.price_to_list.entry(price) {
            Entry::Occupied(mut level) => {
                level.get_mut().push(order);
                *self.price_to_quantity.get_mut(&price).unwrap() += qty;
            }
            Entry::Vacant(level) => {
                let mut queue = PriceLevelQueue::new();
                queue.push(order);
                level.insert(queue);
                self.price_to_quantity.insert(price, qty);
                self.price_heap.push(S::heap_key(price));
            }
        }
    }

    /// Removes `order_id`, resting at `price`, from its level. Drops the
    /// level's map entries once it empties; the stale heap key is left
    /// for the next lazy cleanup.
    pub fn delete_order(&mut self, price: Price, order_id: OrderId) {
        let Some(level) = self.price_to_list.get_mut(&price) else {
            return;
        };
        let Some(removed) = level.remove(order_id) else {
            return;
        };
        if let Some(q) = self.price_to_quantity.get_mut(&price) {
            *q = q.saturating_sub(removed.quantity);
        }
        if level.is_empty() {
            self.price_to_list.remove(&price);
            self.price_to_quantity.remove(&price);
        }
    }

    /// Decreases the head order at `price` by `delta`. Matching only ever
    /// partially fills the order it just read back from `get_best_order`,
    /// which is always the head of its level.
    pub fn decrease_best_quantity(&mut self, price: Price, delta: Qty) {
        if let Some(level) = self.price_to_list.get_mut(&price) {
            if let Some(head) = level.peek_mut() {
                head.quantity = head.quantity.saturating_sub(delta);
            }
        }
        if let Some(q) = self.price_to_quantity.get_mut(&price) {
            *q = q.saturating_sub(delta);
        }
    }

    /// The best (highest bid / lowest ask) resting order, after popping
    /// any heap entries for prices that have since emptied out.
    pub fn get_best_order(&mut self) -> Option<&Order> {
        self.cleanup();
        let key = *self.price_heap.peek()?;
        let price = S::price_of(key);
        self.price_to_list.get(&price).and_then(PriceLevelQueue::peek)
    }

    pub fn get_best_price(&mut self) -> Option<Price> {
        self.get_best_order()
            .map(|o| o.price.expect("resting order without a price"))
    }

    pub fn get_quantity_for_price(&self, price: Price) -> Qty {
        self.price_to_quantity.get(&price).copied().unwrap_or(0)
    }

    fn cleanup(&mut self) {
        while let Some(&key) = self.price_heap.peek() {
            let price = S::price_of(key);
            let empty = self
                .price_to_list
                .get(&price)
                .map(|l| l.is_empty())
                .unwrap_or(true);
            if empty {
                self.price_heap.pop();
            } else {
                break;
            }
        }
    }
}

impl<S: SideKind> Default for SideBook<S> {
    fn default() -> Self {
        Self::new()
    }
}

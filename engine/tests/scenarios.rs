//! End-to-end scenarios against the public `OrderBook` surface.

use common::time::Nanos;
use engine::{Order, OrderBook, OrderKind, Side};

fn limit(id: u64, side: Side, price: i64, qty: u64) -> Order {
    Order::new_limit(id, Nanos::new(0), side, price, qty, "acct")
}

fn market(id: u64, side: Side, qty: u64) -> Order {
    Order::new_market(id, Nanos::new(0), side, qty, "acct")
}

#[test]
fn single_limit_order_rests_when_book_is_empty() {
    let mut book = OrderBook::new();
    let mut o = limit(1, Side::Bid, 100, 10);
    book.place_order(&mut o).unwrap();

    assert_eq!(o.quantity, 10);
    assert_eq!(book.get_best_bid_price(), Some(100));
    assert_eq!(book.get_best_ask_price(), None);
    assert_eq!(book.get_quantity_for_price(Side::Bid, 100), 10);
}

#[test]
fn orders_at_one_price_level_trade_in_fifo_arrival_order() {
    let mut book = OrderBook::new();
    let mut first = limit(1, Side::Ask, 100, 5);
    let mut second = limit(2, Side::Ask, 100, 5);
    let mut third = limit(3, Side::Ask, 100, 5);
    book.place_order(&mut first).unwrap();
    book.place_order(&mut second).unwrap();
    book.place_order(&mut third).unwrap();

    let mut taker = limit(4, Side::Bid, 100, 5);
    book.place_order(&mut taker).unwrap();
    assert_eq!(book.get_best_ask_order().unwrap().order_id, 2);

    let mut taker2 = limit(5, Side::Bid, 100, 5);
    book.place_order(&mut taker2).unwrap();
    assert_eq!(book.get_best_ask_order().unwrap().order_id, 3);
}

#[test]
fn matching_limit_orders_fully_clear_both_sides() {
    let mut book = OrderBook::new();
    let mut resting = limit(1, Side::Ask, 100, 10);
    book.place_order(&mut resting).unwrap();

    let mut incoming = limit(2, Side::Bid, 100, 10);
    book.place_order(&mut incoming).unwrap();

    assert_eq!(incoming.quantity, 0);
    assert_eq!(book.get_best_bid_price(), None);
    assert_eq!(book.get_best_ask_price(), None);
}

#[test]
fn large_order_sweeps_two_price_levels() {
    let mut book = OrderBook::new();
    let mut near = limit(1, Side::Ask, 100, 5);
    let mut far = limit(2, Side::Ask, 101, 5);
    book.place_order(&mut near).unwrap();
    book.place_order(&mut far).unwrap();

    let mut sweeper = limit(3, Side::Bid, 101, 10);
    book.place_order(&mut sweeper).unwrap();

    assert_eq!(sweeper.quantity, 0);
    assert_eq!(book.get_best_ask_price(), None);
}

#[test]
fn cancelling_a_middle_order_then_matching_skips_it() {
    let mut book = OrderBook::new();
    let mut first = limit(1, Side::Ask, 100, 5);
    let mut second = limit(2, Side::Ask, 100, 5);
    let mut third = limit(3, Side::Ask, 100, 5);
    book.place_order(&mut first).unwrap();
    book.place_order(&mut second).unwrap();
    book.place_order(&mut third).unwrap();

    book.cancel_order(2);

    let mut sweeper = limit(4, Side::Bid, 100, 10);
    book.place_order(&mut sweeper).unwrap();

    assert_eq!(sweeper.quantity, 0);
    assert_eq!(book.get_best_ask_price(), None);
}

#[test]
fn market_order_exhausts_book_and_discards_residual() {
    let mut book = OrderBook::new();
    let mut resting = limit(1, Side::Ask, 100, 5);
    book.place_order(&mut resting).unwrap();

    let mut sweeper = market(2, Side::Bid, 20);
    book.place_order(&mut sweeper).unwrap();

    assert_eq!(sweeper.quantity, 15);
    assert_eq!(book.get_best_ask_price(), None);

    // the residual quantity is gone, not resting anywhere
    book.cancel_order(2);
    assert_eq!(book.get_best_bid_price(), None);
}

#[test]
fn place_then_cancel_round_trips_to_an_empty_book() {
    let mut book = OrderBook::new();
    let mut o = limit(1, Side::Bid, 100, 10);
    book.place_order(&mut o).unwrap();
    book.cancel_order(1);

    assert_eq!(book.get_best_bid_price(), None);
    assert_eq!(book.get_quantity_for_price(Side::Bid, 100), 0);
}

#[test]
fn double_cancel_is_idempotent() {
    let mut book = OrderBook::new();
    let mut o = limit(1, Side::Bid, 100, 10);
    book.place_order(&mut o).unwrap();
    book.cancel_order(1);
    book.cancel_order(1);

    assert_eq!(book.get_best_bid_price(), None);
}

#[test]
fn cancelling_two_resting_orders_commutes() {
    let mut book_a = OrderBook::new();
    let mut o1 = limit(1, Side::Bid, 100, 10);
    let mut o2 = limit(2, Side::Bid, 101, 5);
    book_a.place_order(&mut o1).unwrap();
    book_a.place_order(&mut o2).unwrap();
    book_a.cancel_order(1);
    book_a.cancel_order(2);

    let mut book_b = OrderBook::new();
    let mut o1b = limit(1, Side::Bid, 100, 10);
    let mut o2b = limit(2, Side::Bid, 101, 5);
    book_b.place_order(&mut o1b).unwrap();
    book_b.place_order(&mut o2b).unwrap();
    book_b.cancel_order(2);
    book_b.cancel_order(1);

    assert_eq!(book_a.get_best_bid_price(), book_b.get_best_bid_price());
}

#[test]
fn rejected_order_leaves_book_state_untouched() {
    let mut book = OrderBook::new();
    let mut resting = limit(1, Side::Bid, 100, 10);
    book.place_order(&mut resting).unwrap();

    let mut duplicate = limit(1, Side::Bid, 105, 3);
    assert!(book.place_order(&mut duplicate).is_err());

    assert_eq!(book.get_best_bid_price(), Some(100));
    assert_eq!(book.get_quantity_for_price(Side::Bid, 100), 10);
    assert_eq!(book.get_quantity_for_price(Side::Bid, 105), 0);
}

#[test]
fn trigger_orders_are_never_accepted() {
    let mut book = OrderBook::new();
    let mut o = Order {
        kind: OrderKind::Trigger,
        ..limit(1, Side::Bid, 100, 10)
    };
    assert!(book.place_order(&mut o).is_err());
    assert_eq!(book.get_best_bid_price(), None);
}

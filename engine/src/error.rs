//! Typed rejection reasons for `OrderBook::place_order`.

use common::OrderId;

use crate::order::OrderKind;

/// Everything that can make `place_order` refuse an order before any
/// state is touched. Checked up front, in full, before the book is
/// mutated at all: a rejected order never partially applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("order quantity must be strictly positive")]
    NonPositiveQuantity,

    #[error("limit order is missing a price")]
    MissingPrice,

    #[error("limit order price must be strictly positive")]
    NonPositivePrice,

    #[error("order id {0} is already resting on the book")]
    DuplicateOrderId(OrderId),

    #[error("order kind {0:?} is not accepted by place_order")]
    UnsupportedKind(OrderKind),
}

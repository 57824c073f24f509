//! Capacity hints for `OrderBook`.

/// Pre-sizing hints for the maps and heaps inside an `OrderBook`. Purely
/// an allocation-avoidance knob: every field defaults to zero, and the
/// book grows its storage on demand regardless of what is passed here.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub expected_price_levels: usize,
    pub expected_resting_orders: usize,
}

impl EngineConfig {
    pub fn new(expected_price_levels: usize, expected_resting_orders: usize) -> Self {
        Self {
            expected_price_levels,
            expected_resting_orders,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(0, 0)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

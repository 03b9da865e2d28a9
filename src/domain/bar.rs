//! Bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed candle carrying both sides of the book.
///
/// The ask side (high/low/close) is what the upstream ATR derivation reads;
/// the engine itself fills on the bid side only: entries at `bid_open`,
/// exits at `bid_close`. Index position in the series is the unit of
/// sequencing — bars must be time-ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub time: DateTime<Utc>,
    pub ask_high: f64,
    pub ask_low: f64,
    pub ask_close: f64,
    pub bid_open: f64,
    pub bid_close: f64,
}

impl Bar {
    /// Returns true if either fill-side price is NaN.
    ///
    /// Such rows are dropped before signal detection, together with rows
    /// whose volatility value is NaN.
    pub fn has_price_gap(&self) -> bool {
        self.bid_open.is_nan() || self.bid_close.is_nan()
    }
}

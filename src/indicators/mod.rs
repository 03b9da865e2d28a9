//! Indicator implementations feeding the engine's input columns.
//!
//! Indicators are precomputed once over the full bar series and return a
//! `Vec<f64>` aligned to it, with NaN marking warm-up rows. The engine only
//! ever consumes finished columns; nothing here is evaluated bar-by-bar
//! during simulation.

pub mod atr;
pub mod sma;

pub use atr::{true_range, Atr};
pub use sma::{rolling_mean, Sma};

use crate::domain::Bar;

/// A precomputed, series-aligned indicator.
pub trait Indicator {
    fn name(&self) -> &str;

    /// Bars consumed before the first non-NaN value.
    fn lookback(&self) -> usize;

    /// Compute one value per bar, NaN where undefined.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Create synthetic bars from bid closes for testing.
///
/// bid_open = previous close (or close for the first bar); the ask side is
/// offset by a fixed spread with a one-unit high/low band.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    use chrono::{Duration, TimeZone, Utc};
    let base_time = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let ask_close = close + 0.2;
            Bar {
                time: base_time + Duration::hours(i as i64),
                ask_high: open.max(close) + 1.2,
                ask_low: open.min(close) - 0.8,
                ask_close,
                bid_open: open,
                bid_close: close,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

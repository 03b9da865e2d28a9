//! Simple Moving Average (SMA).
//!
//! Rolling arithmetic mean over a fixed window, NaN during warm-up
//! (first period - 1 values). Maintained as a running window sum, O(n)
//! over the series regardless of the window length.

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Rolling mean over a slice. NaN for the first `period - 1` indices and
/// for any window containing a NaN input.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    let mut sum = 0.0;
    let mut nan_in_window = 0usize;

    for i in 0..n {
        let entering = values[i];
        if entering.is_nan() {
            nan_in_window += 1;
        } else {
            sum += entering;
        }

        if i >= period {
            let leaving = values[i - period];
            if leaving.is_nan() {
                nan_in_window -= 1;
            } else {
                sum -= leaving;
            }
        }

        if i + 1 >= period && nan_in_window == 0 {
            result[i] = sum / period as f64;
        }
    }

    result
}

/// SMA of bid closes.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.bid_close).collect();
        rolling_mean(&closes, self.period)
    }
}

//! Average True Range (ATR) over the ask side.
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), with
//! TR[0] = high[0] - low[0] (no previous close). The ATR is an arithmetic
//! mean of true ranges over a window that expands from 1 up to `period`,
//! so values exist from the very first bar instead of a NaN warm-up.
//! Maintained as a running window sum, O(n) over the series.

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Compute the True Range series from the ask high/low/close.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];
    if n == 0 {
        return tr;
    }

    let h = bars[0].ask_high;
    let l = bars[0].ask_low;
    if !h.is_nan() && !l.is_nan() {
        tr[0] = h - l;
    }

    for i in 1..n {
        let h = bars[i].ask_high;
        let l = bars[i].ask_low;
        let pc = bars[i - 1].ask_close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            continue;
        }
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

/// ATR with an expanding warm-up window.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    /// Zero: the warm-up window expands instead of emitting NaN.
    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let tr = true_range(bars);
        let n = tr.len();
        let mut result = vec![f64::NAN; n];

        let mut sum = 0.0;
        let mut nan_in_window = 0usize;

        for i in 0..n {
            let entering = tr[i];
            if entering.is_nan() {
                nan_in_window += 1;
            } else {
                sum += entering;
            }

            if i >= self.period {
                let leaving = tr[i - self.period];
                if leaving.is_nan() {
                    nan_in_window -= 1;
                } else {
                    sum -= leaving;
                }
            }

            let window = (i + 1).min(self.period);
            if nan_in_window == 0 {
                result[i] = sum / window as f64;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::{Duration, TimeZone, Utc};

    /// Bars with explicit ask (high, low, close); bid side filled from the close.
    fn make_ask_bars(data: &[(f64, f64, f64)]) -> Vec<Bar> {
        let base_time = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(high, low, close))| Bar {
                time: base_time + Duration::hours(i as i64),
                ask_high: high,
                ask_low: low,
                ask_close: close,
                bid_open: close - 0.5,
                bid_close: close - 0.2,
            })
            .collect()
    }

    #[test]
    fn true_range_basic() {
        let bars = make_ask_bars(&[
            (105.0, 95.0, 102.0),  // TR = 105-95 = 10
            (108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&bars);
        assert_approx(tr[0], 10.0, DEFAULT_EPSILON);
        assert_approx(tr[1], 8.0, DEFAULT_EPSILON);
        assert_approx(tr[2], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // Prev close 100, next bar entirely above it.
        let bars = make_ask_bars(&[(102.0, 97.0, 100.0), (115.0, 108.0, 112.0)]);
        let tr = true_range(&bars);
        assert_approx(tr[1], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_expanding_warmup_then_rolling() {
        // TR series: [10, 8, 9, 6, 6]
        let bars = make_ask_bars(&[
            (105.0, 95.0, 102.0),
            (108.0, 100.0, 106.0),
            (107.0, 98.0, 99.0),
            (103.0, 97.0, 101.0),
            (106.0, 100.0, 105.0),
        ]);
        let atr = Atr::new(3);
        let result = atr.compute(&bars);

        // Window expands 1 → 3, then rolls.
        assert_approx(result[0], 10.0, DEFAULT_EPSILON); // mean(10)
        assert_approx(result[1], 9.0, DEFAULT_EPSILON); // mean(10,8)
        assert_approx(result[2], 9.0, DEFAULT_EPSILON); // mean(10,8,9)
        assert_approx(result[3], 23.0 / 3.0, DEFAULT_EPSILON); // mean(8,9,6)
        assert_approx(result[4], 7.0, DEFAULT_EPSILON); // mean(9,6,6)
    }

    #[test]
    fn atr_streaming_matches_naive_recompute() {
        let data: Vec<(f64, f64, f64)> = (0..150)
            .map(|i| {
                let mid = 100.0 + ((i as f64) * 0.3).sin() * 15.0;
                (mid + 2.0, mid - 2.0, mid + 0.5)
            })
            .collect();
        let bars = make_ask_bars(&data);
        let period = 14;
        let fast = Atr::new(period).compute(&bars);
        let tr = true_range(&bars);

        for i in 0..bars.len() {
            let window = (i + 1).min(period);
            let naive: f64 = tr[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert_approx(fast[i], naive, 1e-9);
        }
    }

    #[test]
    fn atr_nan_ask_row_poisons_affected_windows() {
        let mut bars = make_ask_bars(&[
            (105.0, 95.0, 102.0),
            (108.0, 100.0, 106.0),
            (107.0, 98.0, 99.0),
            (103.0, 97.0, 101.0),
        ]);
        bars[1].ask_high = f64::NAN;
        let result = Atr::new(2).compute(&bars);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert!(result[1].is_nan()); // window contains the NaN TR
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan()); // window [TR2, TR3] is clean again
    }

    #[test]
    fn atr_empty_series() {
        let result = Atr::new(14).compute(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn atr_name_and_lookback() {
        let atr = Atr::new(15);
        assert_eq!(atr.name(), "atr_15");
        assert_eq!(atr.lookback(), 0);
    }
}

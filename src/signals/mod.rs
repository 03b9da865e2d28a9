//! Crossover signal detection.
//!
//! A Long signal fires at bar i when reference A moves from at-or-below
//! reference B (at i-1) to strictly above it (at i); Short is the mirror.
//! The non-strict prior comparison means an exact tie followed by a strict
//! breakout counts as a cross, while a tie that persists never re-triggers.
//!
//! Timing contract: a signal at index i reflects information through bar i's
//! close and is executed by the simulator at bar i+1's bid open. The final
//! bar therefore never carries a signal — it has no next open to fill at.

use serde::{Deserialize, Serialize};

use crate::domain::Side;
use crate::indicators::rolling_mean;

/// Which pair of reference series the crossover is computed over.
///
/// One engine, two historical strategy variants: two moving averages of the
/// bid close, or the bid close itself against one moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverRule {
    /// Short-period MA (reference A) vs. long-period MA (reference B).
    MaOverMa { minor: usize, major: usize },
    /// Bid close (reference A) vs. one MA (reference B).
    PriceOverMa { period: usize },
}

impl CrossoverRule {
    /// Bars consumed before both references are defined.
    pub fn warmup_bars(&self) -> usize {
        match *self {
            CrossoverRule::MaOverMa { major, .. } => major,
            CrossoverRule::PriceOverMa { period } => period,
        }
    }

    fn reference_series(&self, closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
        match *self {
            CrossoverRule::MaOverMa { minor, major } => {
                (rolling_mean(closes, minor), rolling_mean(closes, major))
            }
            CrossoverRule::PriceOverMa { period } => {
                (closes.to_vec(), rolling_mean(closes, period))
            }
        }
    }
}

/// Derive the per-bar signal series for a rule. Pure function of its inputs.
pub fn detect(rule: &CrossoverRule, closes: &[f64]) -> Vec<Option<Side>> {
    let (ref_a, ref_b) = rule.reference_series(closes);
    crossovers(&ref_a, &ref_b)
}

/// Crossover scan over two equal-length reference series.
///
/// NaN references (warm-up rows) never satisfy either comparison, so
/// undefined regions stay signal-free without explicit exclusion.
pub fn crossovers(ref_a: &[f64], ref_b: &[f64]) -> Vec<Option<Side>> {
    assert_eq!(
        ref_a.len(),
        ref_b.len(),
        "reference series must be equal length"
    );
    let n = ref_a.len();
    let mut signals = vec![None; n];

    // Skip index 0 (no prior bar) and the final index (no entry bar after it).
    for i in 1..n.saturating_sub(1) {
        let (a_prev, b_prev) = (ref_a[i - 1], ref_b[i - 1]);
        let (a_cur, b_cur) = (ref_a[i], ref_b[i]);

        if a_prev <= b_prev && a_cur > b_cur {
            signals[i] = Some(Side::Long);
        } else if a_prev >= b_prev && a_cur < b_cur {
            signals[i] = Some(Side::Short);
        }
    }

    signals
}

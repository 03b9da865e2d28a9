//! Position-sizing risk control.
//!
//! Two modes: a constant risk percentage fixed for the whole run, or the
//! 8-step ladder that walks up after a 10% cumulative step gain and down
//! after a 5% cumulative step loss (both measured against initial capital).

use serde::{Deserialize, Serialize};

/// The eight risk percentages of the adaptive ladder.
pub const RISK_STEPS: [f64; 8] = [0.01, 0.02, 0.04, 0.08, 0.16, 0.32, 0.64, 1.0];

/// Step up once cumulative step profit reaches +10% of initial capital.
pub const STEP_UP_RATIO: f64 = 0.10;

/// Step down once cumulative step profit reaches -5% of initial capital.
pub const STEP_DOWN_RATIO: f64 = -0.05;

/// How the per-trade risk percentage is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RiskMode {
    /// One percentage for every trade; [`RiskState`] is never consulted.
    Constant { risk_pct: f64 },
    /// Walk the [`RISK_STEPS`] ladder on cumulative performance.
    Adaptive,
}

impl Default for RiskMode {
    fn default() -> Self {
        RiskMode::Constant { risk_pct: 0.01 }
    }
}

/// Adaptive-ladder state, owned by a single simulation run.
///
/// Starts at step 0 with no accumulated profit. The step index can never
/// leave `[0, 7]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiskState {
    step: usize,
    step_profit: f64,
}

impl RiskState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_profit(&self) -> f64 {
        self.step_profit
    }

    /// Called once per trade entry, before sizing. Applies any pending step
    /// transition (which resets the accumulated step profit) and returns the
    /// risk percentage for the trade about to open.
    pub fn risk_for_entry(&mut self, initial_capital: f64) -> f64 {
        let ratio = self.step_profit / initial_capital;
        if ratio >= STEP_UP_RATIO {
            self.step = (self.step + 1).min(RISK_STEPS.len() - 1);
            self.step_profit = 0.0;
        } else if ratio <= STEP_DOWN_RATIO {
            self.step = self.step.saturating_sub(1);
            self.step_profit = 0.0;
        }
        RISK_STEPS[self.step]
    }

    /// Called once per closed trade; accumulates toward the next transition.
    pub fn record_close(&mut self, profit_loss: f64) {
        self.step_profit += profit_loss;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPITAL: f64 = 10_000.0;

    #[test]
    fn starts_at_lowest_step() {
        let mut state = RiskState::new();
        assert_eq!(state.risk_for_entry(CAPITAL), 0.01);
        assert_eq!(state.step(), 0);
    }

    #[test]
    fn steps_up_at_exactly_ten_percent() {
        let mut state = RiskState::new();
        state.record_close(1_000.0); // ratio = 0.10 exactly
        assert_eq!(state.risk_for_entry(CAPITAL), 0.02);
        assert_eq!(state.step(), 1);
        assert_eq!(state.step_profit(), 0.0); // reset on transition
    }

    #[test]
    fn steps_down_at_exactly_five_percent_loss() {
        let mut state = RiskState::new();
        state.record_close(1_000.0);
        state.risk_for_entry(CAPITAL); // now at step 1
        state.record_close(-500.0); // ratio = -0.05 exactly
        assert_eq!(state.risk_for_entry(CAPITAL), 0.01);
        assert_eq!(state.step(), 0);
        assert_eq!(state.step_profit(), 0.0);
    }

    #[test]
    fn between_thresholds_nothing_moves() {
        let mut state = RiskState::new();
        state.record_close(999.0); // just under +10%
        assert_eq!(state.risk_for_entry(CAPITAL), 0.01);
        assert_eq!(state.step_profit(), 999.0); // not reset

        state.record_close(-1_498.0); // cumulative -499, just above -5%
        assert_eq!(state.risk_for_entry(CAPITAL), 0.01);
        assert_eq!(state.step_profit(), -499.0);
    }

    #[test]
    fn clamps_at_top_step() {
        let mut state = RiskState::new();
        for _ in 0..12 {
            state.record_close(1_000.0);
            state.risk_for_entry(CAPITAL);
        }
        assert_eq!(state.step(), 7);
        assert_eq!(state.risk_for_entry(CAPITAL), 1.0);
    }

    #[test]
    fn clamps_at_bottom_step() {
        let mut state = RiskState::new();
        for _ in 0..5 {
            state.record_close(-500.0);
            state.risk_for_entry(CAPITAL);
        }
        assert_eq!(state.step(), 0);
        assert_eq!(state.risk_for_entry(CAPITAL), 0.01);
    }

    #[test]
    fn profit_accumulates_across_trades_until_a_threshold_fires() {
        let mut state = RiskState::new();
        state.record_close(400.0);
        state.risk_for_entry(CAPITAL);
        state.record_close(300.0);
        state.risk_for_entry(CAPITAL);
        state.record_close(300.0); // cumulative 1_000 → 10%
        assert_eq!(state.risk_for_entry(CAPITAL), 0.02);
    }

    #[test]
    fn transition_applies_on_next_entry_not_retroactively() {
        // The trade that pushes cumulative profit to the threshold is itself
        // sized at the old step; the step-up lands on the following entry.
        let mut state = RiskState::new();
        assert_eq!(state.risk_for_entry(CAPITAL), 0.01);
        state.record_close(1_000.0);
        assert_eq!(state.risk_for_entry(CAPITAL), 0.02);
    }

    #[test]
    fn default_mode_is_one_percent_constant() {
        assert_eq!(RiskMode::default(), RiskMode::Constant { risk_pct: 0.01 });
    }
}

//! crossbt — deterministic backtesting of moving-average-crossover rules.
//!
//! The crate turns a time-ordered series of bid/ask bars plus a precomputed
//! volatility column into a reproducible trade log and running capital curve:
//! - Domain types (bars, positions, closed trades)
//! - Crossover signal detection (MA vs. MA, or price vs. MA)
//! - Bracket-order exit scanning against bid closes
//! - 8-step adaptive risk sizing
//! - Capital ledger and run fingerprinting
//!
//! Signals detected at bar `i` are always executed at bar `i + 1`'s bid open,
//! so no trade can use information that was not available at decision time.

pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod indicators;
pub mod risk;
pub mod signals;

pub use domain::{Bar, Position, Side, TradeRecord};
pub use engine::{run_backtest, ConfigError, EngineError, RunResult, StrategyConfig};
pub use risk::{RiskMode, RiskState, RISK_STEPS};
pub use signals::CrossoverRule;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: simulation runs must be independently ownable, so
    /// every type that crosses a run boundary is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();
        require_send::<domain::TradeRecord>();
        require_sync::<domain::TradeRecord>();

        require_send::<signals::CrossoverRule>();
        require_sync::<signals::CrossoverRule>();

        require_send::<risk::RiskState>();
        require_sync::<risk::RiskState>();

        require_send::<engine::StrategyConfig>();
        require_sync::<engine::StrategyConfig>();
        require_send::<engine::RunResult>();
        require_sync::<engine::RunResult>();

        require_send::<fingerprint::RunFingerprint>();
        require_sync::<fingerprint::RunFingerprint>();
    }
}

//! Trade simulation engine.
//!
//! Consumes a bar series plus its volatility column, detects crossover
//! signals, opens bracket positions at the next bar's bid open, scans
//! forward for close-only exits, and settles each trade against the
//! running-capital ledger.

pub mod config;
pub mod ledger;
pub mod simulator;

pub use config::{ConfigError, StrategyConfig};
pub use ledger::Ledger;
pub use simulator::{run_backtest, EngineError, RunResult};

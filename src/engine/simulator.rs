//! The simulation loop: signal → entry → exit scan → settlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Bar, Position, TradeRecord};
use crate::engine::config::{ConfigError, StrategyConfig};
use crate::engine::ledger::Ledger;
use crate::risk::{RiskMode, RiskState};
use crate::signals;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("volatility series has {values} values for {bars} bars")]
    VolatilityLength { bars: usize, values: usize },
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub trades: Vec<TradeRecord>,
    pub initial_capital: f64,
    pub final_capital: f64,
    /// Signals detected, including any whose position never found an exit
    /// before the series ended (`trades.len() < signal_count` then).
    pub signal_count: usize,
}

impl RunResult {
    pub fn total_profit(&self) -> f64 {
        self.final_capital - self.initial_capital
    }
}

/// Read-only columnar view of the rows that survive cleaning.
///
/// Rows with a NaN fill price or NaN volatility are dropped before signal
/// detection, and indices re-base onto this view — the same contract as the
/// upstream NaN-dropping the input columns went through.
struct CleanSeries {
    time: Vec<DateTime<Utc>>,
    bid_open: Vec<f64>,
    bid_close: Vec<f64>,
    volatility: Vec<f64>,
}

impl CleanSeries {
    fn build(bars: &[Bar], volatility: &[f64]) -> Self {
        let mut series = CleanSeries {
            time: Vec::with_capacity(bars.len()),
            bid_open: Vec::with_capacity(bars.len()),
            bid_close: Vec::with_capacity(bars.len()),
            volatility: Vec::with_capacity(bars.len()),
        };
        for (bar, &vol) in bars.iter().zip(volatility) {
            if bar.has_price_gap() || vol.is_nan() {
                continue;
            }
            series.time.push(bar.time);
            series.bid_open.push(bar.bid_open);
            series.bid_close.push(bar.bid_close);
            series.volatility.push(vol);
        }
        series
    }

    fn len(&self) -> usize {
        self.time.len()
    }
}

/// Simulate the configured crossover rule over `bars`.
///
/// `volatility` must hold one value per bar (the precomputed ATR column).
/// Each signal at cleaned index `i` opens a position at index `i + 1`'s bid
/// open, bracketed by 3×/6× the volatility value at `i`, and is scanned
/// forward for the first bid close at or beyond either level. Positions
/// still open when the data runs out are discarded, not logged.
///
/// Pure with respect to its inputs: identical data and configuration always
/// produce an identical trade log.
pub fn run_backtest(
    bars: &[Bar],
    volatility: &[f64],
    config: &StrategyConfig,
) -> Result<RunResult, EngineError> {
    config.validate()?;
    if volatility.len() != bars.len() {
        return Err(EngineError::VolatilityLength {
            bars: bars.len(),
            values: volatility.len(),
        });
    }

    let rows = CleanSeries::build(bars, volatility);
    let signals = signals::detect(&config.rule, &rows.bid_close);
    let signal_count = signals.iter().filter(|s| s.is_some()).count();

    let mut risk = RiskState::new();
    let mut ledger = Ledger::new(config.initial_capital);
    let n = rows.len();

    for i in 0..n {
        let Some(side) = signals[i] else { continue };

        // Signal detection guarantees i + 1 < n: the final bar never signals.
        let entry_bar = i + 1;
        let risk_pct = match config.risk_mode {
            RiskMode::Constant { risk_pct } => risk_pct,
            RiskMode::Adaptive => risk.risk_for_entry(config.initial_capital),
        };
        let risk_amount = risk_pct * ledger.capital();
        let position = Position::open(
            side,
            entry_bar,
            rows.time[entry_bar],
            rows.bid_open[entry_bar],
            rows.volatility[i],
            risk_pct,
            risk_amount,
        );

        // Walk forward on bid closes; the first qualifying bar wins and the
        // fill is that bar's close, not the theoretical bracket level.
        for j in entry_bar + 1..n {
            let close = rows.bid_close[j];
            if position.exits_at(close) {
                let trade = ledger.settle(&position, j, rows.time[j], close);
                risk.record_close(trade.profit_loss);
                break;
            }
        }
        // No exit before the end of data: the position is dropped unlogged.
    }

    let final_capital = ledger.capital();
    Ok(RunResult {
        trades: ledger.into_trades(),
        initial_capital: config.initial_capital,
        final_capital,
        signal_count,
    })
}

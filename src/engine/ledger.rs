//! Running-capital ledger.

use chrono::{DateTime, Utc};

use crate::domain::{Position, TradeRecord};

/// Accumulates closed trades and the capital curve.
///
/// Capital is mutated exactly once per settled trade, by exactly that
/// trade's profit/loss, so `capital == initial + Σ profit_loss` holds at
/// every point of a run.
#[derive(Debug, Clone)]
pub struct Ledger {
    capital: f64,
    trades: Vec<TradeRecord>,
}

impl Ledger {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            capital: initial_capital,
            trades: Vec::new(),
        }
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn into_trades(self) -> Vec<TradeRecord> {
        self.trades
    }

    /// Settles a position that exited at `exit_price` (a bid close): applies
    /// the profit/loss to capital and appends the record with the post-trade
    /// capital snapshot.
    pub fn settle(
        &mut self,
        position: &Position,
        exit_bar: usize,
        exit_time: DateTime<Utc>,
        exit_price: f64,
    ) -> &TradeRecord {
        let pip_amount = position.pip_amount(exit_price);
        let profit_loss = pip_amount * position.risk_amount;
        self.capital += profit_loss;

        self.trades.push(TradeRecord {
            side: position.side,
            entry_bar: position.entry_bar,
            entry_time: position.entry_time,
            entry_price: position.entry_price,
            exit_bar,
            exit_time,
            exit_price,
            pip_amount,
            profit_loss,
            capital_after: self.capital,
            risk_pct: position.risk_pct,
        });
        &self.trades[self.trades.len() - 1]
    }
}

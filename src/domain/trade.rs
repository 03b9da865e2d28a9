//! TradeRecord — a completed round-trip trade with its capital snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

/// A closed trade: entry → exit, plus the sizing that was applied and the
/// capital immediately after settlement.
///
/// Bar indices refer to the cleaned series the run operated on (rows with
/// NaN prices or volatility removed). Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub side: Side,

    // ── Entry ──
    pub entry_bar: usize,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,

    // ── Exit ──
    pub exit_bar: usize,
    pub exit_time: DateTime<Utc>,
    pub exit_price: f64,

    // ── Outcome ──
    /// Signed price movement in the favorable direction of the trade.
    pub pip_amount: f64,
    /// `pip_amount` × the currency amount staked per pip.
    pub profit_loss: f64,
    /// Ledger capital immediately after this trade settled.
    pub capital_after: f64,
    /// Risk percentage that sized this trade.
    pub risk_pct: f64,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.profit_loss > 0.0
    }

    pub fn bars_held(&self) -> usize {
        self.exit_bar - self.entry_bar
    }
}

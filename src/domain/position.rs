//! Position — a transient bracket position, alive between entry and exit.

use chrono::{DateTime, Utc};

use super::trade::Side;

/// Stop distance as a multiple of the signal bar's volatility value.
pub const STOP_ATR_MULTIPLE: f64 = 3.0;

/// Target distance as a multiple of the signal bar's volatility value
/// (fixed 1:2 risk:reward against [`STOP_ATR_MULTIPLE`]).
pub const TARGET_ATR_MULTIPLE: f64 = 6.0;

/// An open bracket position. Exists only between entry and exit; once the
/// exit scan resolves it becomes a [`TradeRecord`](super::TradeRecord) and
/// the position is discarded.
#[derive(Debug, Clone)]
pub struct Position {
    pub side: Side,
    pub entry_bar: usize,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    pub stop: f64,
    pub target: f64,
    /// Risk percentage that sized this position.
    pub risk_pct: f64,
    /// Currency amount staked per pip: risk percentage × capital at entry.
    pub risk_amount: f64,
}

impl Position {
    /// Opens a position with bracket levels derived from the signal bar's
    /// volatility value.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        side: Side,
        entry_bar: usize,
        entry_time: DateTime<Utc>,
        entry_price: f64,
        volatility: f64,
        risk_pct: f64,
        risk_amount: f64,
    ) -> Self {
        let stop_distance = STOP_ATR_MULTIPLE * volatility;
        let target_distance = TARGET_ATR_MULTIPLE * volatility;
        let (stop, target) = match side {
            Side::Long => (entry_price - stop_distance, entry_price + target_distance),
            Side::Short => (entry_price + stop_distance, entry_price - target_distance),
        };
        Self {
            side,
            entry_bar,
            entry_time,
            entry_price,
            stop,
            target,
            risk_pct,
            risk_amount,
        }
    }

    /// Whether a bid close takes this position out (close-only fill model:
    /// no intrabar high/low, boundary touches count).
    pub fn exits_at(&self, close: f64) -> bool {
        match self.side {
            Side::Long => close <= self.stop || close >= self.target,
            Side::Short => close >= self.stop || close <= self.target,
        }
    }

    /// Signed favorable price movement for an exit at `close`.
    pub fn pip_amount(&self, close: f64) -> f64 {
        match self.side {
            Side::Long => close - self.entry_price,
            Side::Short => self.entry_price - close,
        }
    }
}

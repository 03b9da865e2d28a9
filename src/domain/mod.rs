//! Domain types: bars, transient positions, closed trades.

pub mod bar;
pub mod position;
pub mod trade;

pub use bar::Bar;
pub use position::{Position, STOP_ATR_MULTIPLE, TARGET_ATR_MULTIPLE};
pub use trade::{Side, TradeRecord};

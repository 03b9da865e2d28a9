//! Run fingerprinting — deterministic identification of inputs and outputs.
//!
//! Three blake3 digests pin down a run: the strategy configuration
//! (canonical JSON), the input dataset (raw price and volatility bytes;
//! JSON would reject the NaN warm-up rows), and the produced trade log.
//! Identical data and configuration must reproduce all three exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::engine::{RunResult, StrategyConfig};

/// 32-byte blake3 digest with hex rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    pub fn to_hex(self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Digest of the strategy configuration.
pub fn config_digest(config: &StrategyConfig) -> Digest {
    let json = serde_json::to_string(config).expect("StrategyConfig must serialize");
    Digest::from_bytes(json.as_bytes())
}

/// Digest of the input series: timestamps, both price sides, volatility.
pub fn dataset_digest(bars: &[Bar], volatility: &[f64]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(&bar.time.timestamp_millis().to_le_bytes());
        for price in [
            bar.ask_high,
            bar.ask_low,
            bar.ask_close,
            bar.bid_open,
            bar.bid_close,
        ] {
            hasher.update(&price.to_le_bytes());
        }
    }
    for value in volatility {
        hasher.update(&value.to_le_bytes());
    }
    Digest(*hasher.finalize().as_bytes())
}

/// Digest of the run outcome (trade log plus capital curve endpoints).
pub fn trade_log_digest(result: &RunResult) -> Digest {
    let json = serde_json::to_string(result).expect("RunResult must serialize");
    Digest::from_bytes(json.as_bytes())
}

/// Complete fingerprint of a single backtest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFingerprint {
    pub config: Digest,
    pub dataset: Digest,
    pub trade_log: Digest,
}

impl RunFingerprint {
    pub fn capture(
        config: &StrategyConfig,
        bars: &[Bar],
        volatility: &[f64],
        result: &RunResult,
    ) -> Self {
        Self {
            config: config_digest(config),
            dataset: dataset_digest(bars, volatility),
            trade_log: trade_log_digest(result),
        }
    }
}

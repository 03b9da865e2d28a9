//! Strategy configuration and fail-fast validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::risk::RiskMode;
use crate::signals::CrossoverRule;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("initial capital must be positive and finite (got {0})")]
    InvalidInitialCapital(f64),

    #[error("moving average window must be at least 1")]
    ZeroWindow,

    #[error("minor window {minor} must be shorter than major window {major}")]
    WindowOrder { minor: usize, major: usize },

    #[error("constant risk percentage must be positive and finite (got {0})")]
    InvalidRiskPercentage(f64),
}

/// Everything a simulation run needs besides the data itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Starting capital, currency units. Must be positive: sizing ratios and
    /// the adaptive thresholds are measured against it.
    pub initial_capital: f64,
    pub risk_mode: RiskMode,
    pub rule: CrossoverRule,
}

impl StrategyConfig {
    /// Build a validated configuration.
    pub fn new(
        initial_capital: f64,
        risk_mode: RiskMode,
        rule: CrossoverRule,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            initial_capital,
            risk_mode,
            rule,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(ConfigError::InvalidInitialCapital(self.initial_capital));
        }
        match self.rule {
            CrossoverRule::MaOverMa { minor, major } => {
                if minor == 0 || major == 0 {
                    return Err(ConfigError::ZeroWindow);
                }
                if minor >= major {
                    return Err(ConfigError::WindowOrder { minor, major });
                }
            }
            CrossoverRule::PriceOverMa { period } => {
                if period == 0 {
                    return Err(ConfigError::ZeroWindow);
                }
            }
        }
        if let RiskMode::Constant { risk_pct } = self.risk_mode {
            if !risk_pct.is_finite() || risk_pct <= 0.0 {
                return Err(ConfigError::InvalidRiskPercentage(risk_pct));
            }
        }
        Ok(())
    }
}

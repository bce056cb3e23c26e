//! Configuration types for the earnings engine.
//!
//! These are deserialized from the YAML files in the configuration
//! directory. Every type has a `Default` carrying the standard rules so
//! the engine can run without any files on disk.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Pay rules applied by the earnings calculator.
///
/// # Example
///
/// ```
/// use earnings_engine::config::EarningsRules;
/// use rust_decimal::Decimal;
///
/// let rules = EarningsRules::default();
/// assert_eq!(rules.daily_regular_hours, Decimal::from(8));
/// assert_eq!(rules.monthly_overtime_threshold, Decimal::from(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsRules {
    /// Hours per session paid at the plain rate before overtime starts.
    pub daily_regular_hours: Decimal,
    /// Monthly overtime hours paid at the base overtime multiplier.
    pub monthly_overtime_threshold: Decimal,
    /// Multiplier for overtime within the monthly threshold.
    pub overtime_base_multiplier: Decimal,
    /// Multiplier for overtime beyond the monthly threshold.
    pub overtime_excess_multiplier: Decimal,
    /// Multiplier for every hour worked on a holiday.
    pub holiday_multiplier: Decimal,
}

impl Default for EarningsRules {
    fn default() -> Self {
        Self {
            daily_regular_hours: Decimal::from(8),
            monthly_overtime_threshold: Decimal::from(60),
            overtime_base_multiplier: Decimal::new(125, 2),
            overtime_excess_multiplier: Decimal::new(15, 1),
            holiday_multiplier: Decimal::new(15, 1),
        }
    }
}

impl EarningsRules {
    /// Checks the rules for values the calculator cannot work with.
    ///
    /// Thresholds must be positive and multipliers must not pay less than
    /// the plain hourly rate.
    pub fn validate(&self) -> EngineResult<()> {
        let positive = [
            ("daily_regular_hours", self.daily_regular_hours),
            ("monthly_overtime_threshold", self.monthly_overtime_threshold),
        ];
        for (field, value) in positive {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must be greater than zero, got {}", value),
                });
            }
        }

        let multipliers = [
            ("overtime_base_multiplier", self.overtime_base_multiplier),
            ("overtime_excess_multiplier", self.overtime_excess_multiplier),
            ("holiday_multiplier", self.holiday_multiplier),
        ];
        for (field, value) in multipliers {
            if value < Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must be at least 1, got {}", value),
                });
            }
        }

        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API listens on, e.g. `127.0.0.1:3000`.
    pub bind_address: String,
    /// Maximum sessions returned by a list request that names no limit.
    pub default_list_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            default_list_limit: 50,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    earnings: EarningsRules,
    server: ServerConfig,
}

impl AppConfig {
    /// Creates a new AppConfig from its component parts.
    pub fn new(earnings: EarningsRules, server: ServerConfig) -> Self {
        Self { earnings, server }
    }

    /// Returns the pay rules.
    pub fn earnings(&self) -> &EarningsRules {
        &self.earnings
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }
}

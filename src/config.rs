//! Run parameters and the checks they must pass before an engine is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineSettings;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("simulation horizon must be greater than zero years")]
    NonPositiveHorizon,
    #[error("absorption rate must be in (0, 1], got {0}")]
    AbsorptionRateOutOfRange(f64),
    #[error("report interval must be greater than zero when progress reports are enabled")]
    ZeroReportInterval,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub years: u64,
    pub absorption_rate: f64,
    pub spawn_per_year: u32,
    /// Recruits admitted at year 0, before the first tick.
    pub initial_population: u32,
    pub seed: u64,
    /// Years between progress reports; `None` reports at every tenth of the run.
    pub report_interval: Option<u64>,
    pub show_progress: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            years: 100,
            absorption_rate: 0.1,
            spawn_per_year: 1_000,
            initial_population: 1_000,
            seed: 42,
            report_interval: None,
            show_progress: true,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years == 0 {
            return Err(ConfigError::NonPositiveHorizon);
        }
        // Written so NaN fails too.
        if !(self.absorption_rate > 0.0 && self.absorption_rate <= 1.0) {
            return Err(ConfigError::AbsorptionRateOutOfRange(self.absorption_rate));
        }
        if self.show_progress && self.report_interval == Some(0) {
            return Err(ConfigError::ZeroReportInterval);
        }
        Ok(())
    }

    pub fn report_interval(&self) -> u64 {
        self.report_interval.unwrap_or_else(|| (self.years / 10).max(1))
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            seed: self.seed,
            absorption_rate: self.absorption_rate,
            spawn_per_year: self.spawn_per_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.report_interval(), 10);
    }

    #[test]
    fn zero_years_is_rejected() {
        let config = SimulationConfig {
            years: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveHorizon));
    }

    #[test]
    fn absorption_rate_bounds() {
        for rate in [0.0, -0.5, 1.01, f64::NAN] {
            let config = SimulationConfig {
                absorption_rate: rate,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::AbsorptionRateOutOfRange(_))
            ));
        }
        let full = SimulationConfig {
            absorption_rate: 1.0,
            ..SimulationConfig::default()
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn zero_report_interval_only_matters_with_progress() {
        let mut config = SimulationConfig {
            report_interval: Some(0),
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroReportInterval));
        config.show_progress = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn short_runs_still_report() {
        let config = SimulationConfig {
            years: 7,
            ..SimulationConfig::default()
        };
        assert_eq!(config.report_interval(), 1);
    }
}

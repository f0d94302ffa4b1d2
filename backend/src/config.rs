//! Configuration management for the Seed Production Management Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SEEDBANK_ prefix

use config::{Environment, File};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Dataset source
    #[serde(default)]
    pub data: DataConfig,

    /// Insights generator configuration
    pub insights: InsightsConfig,

    /// Dashboard presentation limits
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    /// JSON fixture to load instead of the embedded demo dataset
    pub fixture_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightsConfig {
    /// Simulated generation latency in milliseconds
    pub delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Species shown in the needs-vs-stock chart
    pub chart_top_n: usize,

    /// Entries in the distribution summary
    pub distribution_top_n: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        let environment =
            std::env::var("SEEDBANK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("insights.delay_ms", 1500)?
            .set_default("dashboard.chart_top_n", 10)?
            .set_default("dashboard.distribution_top_n", 7)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SEEDBANK_ prefix)
            .add_source(
                Environment::with_prefix("SEEDBANK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would leave the dashboard empty
    pub fn validate(&self) -> AppResult<()> {
        if self.dashboard.chart_top_n == 0 {
            return Err(AppError::Configuration(
                "dashboard.chart_top_n must be at least 1".to_string(),
            ));
        }
        if self.dashboard.distribution_top_n == 0 {
            return Err(AppError::Configuration(
                "dashboard.distribution_top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            data: DataConfig::default(),
            insights: InsightsConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_top_n: 10,
            distribution_top_n: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_chart_limit_is_a_configuration_error() {
        let mut config = Config::default();
        config.dashboard.chart_top_n = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(ref msg) if msg.contains("chart_top_n")));

        let mut config = Config::default();
        config.dashboard.distribution_top_n = 0;
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_config_error_maps_to_configuration() {
        let err: AppError = config::ConfigError::NotFound("server.port".to_string()).into();
        assert!(matches!(err, AppError::Configuration(ref msg) if msg.contains("server.port")));
    }
}

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

use crate::core::distance::DEFAULT_ZOOM;
use crate::models::{BillingRates, ZeroVariancePolicy};

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    #[validate(nested)]
    pub geo: GeoSettings,
    #[serde(default)]
    pub billing: BillingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub zero_variance_policy: ZeroVariancePolicy,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeoSettings {
    #[serde(default = "default_zoom")]
    #[validate(range(min = 3, max = 14))]
    pub default_zoom: u8,
    /// Radius for counting assets near a customer
    #[serde(default = "default_nearby_radius_km")]
    #[validate(range(min = 0.0))]
    pub nearby_radius_km: f64,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            nearby_radius_km: default_nearby_radius_km(),
        }
    }
}

fn default_zoom() -> u8 { DEFAULT_ZOOM }
fn default_nearby_radius_km() -> f64 { 50.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct BillingSettings {
    #[serde(default = "default_go_rate")]
    pub go_rate: f64,
    #[serde(default = "default_registration_fee_rate")]
    pub registration_fee_rate: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            go_rate: default_go_rate(),
            registration_fee_rate: default_registration_fee_rate(),
            currency: default_currency(),
        }
    }
}

impl BillingSettings {
    pub fn rates(&self) -> BillingRates {
        BillingRates {
            go_rate: self.go_rate,
            registration_fee_rate: self.registration_fee_rate,
        }
    }
}

fn default_go_rate() -> f64 { 20.0 }
fn default_registration_fee_rate() -> f64 { 5.0 }
fn default_currency() -> String { "DKK".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RENUW__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RENUW__BILLING__GO_RATE -> billing.go_rate
            .add_source(env_source())
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Parse configuration from an inline TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        // Reject malformed TOML with the parser's own message
        source.parse::<toml::Table>().map_err(|e| ConfigError::Message(e.to_string()))?;

        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Message(format!("invalid settings: {}", e)))?;
        Ok(self)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("RENUW")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

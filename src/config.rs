//! TOML-based service configuration.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::pricing::{MeterAccount, PlanCatalog, PricePlan};

/// Upper bound on generated readings per meter.
pub const MAX_READINGS_PER_METER: usize = 100_000;

/// Top-level service configuration parsed from TOML.
///
/// Every section is optional and defaults to the built-in service: three
/// price plans, five meter accounts, and five generated readings per
/// meter. Load from TOML with [`ServiceConfig::from_toml_file`] or use
/// [`ServiceConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP bind address.
    #[serde(default)]
    pub server: ServerConfig,
    /// Startup population of the reading store.
    #[serde(default)]
    pub seed: SeedConfig,
    /// Price plans in catalog order.
    #[serde(default = "PricePlan::defaults")]
    pub price_plans: Vec<PricePlan>,
    /// Meter-to-plan assignments.
    #[serde(default = "MeterAccount::defaults")]
    pub meter_accounts: Vec<MeterAccount>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            seed: SeedConfig::default(),
            price_plans: PricePlan::defaults(),
            meter_accounts: MeterAccount::defaults(),
        }
    }
}

/// HTTP bind address.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    /// TCP port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Startup seeding parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// Whether to populate the store at startup.
    pub enabled: bool,
    /// RNG seed for generated readings.
    pub rng_seed: u64,
    /// Generated readings per account meter (1..=`MAX_READINGS_PER_METER` when enabled).
    pub readings_per_meter: usize,
    /// CSV file to import instead of generating readings.
    pub readings_csv: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rng_seed: 42,
            readings_per_meter: 5,
            readings_csv: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"price_plans[1].unit_rate"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ServiceConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Builds the read-only plan catalog.
    pub fn catalog(&self) -> PlanCatalog {
        PlanCatalog::new(self.price_plans.clone(), self.meter_accounts.clone())
    }

    /// Meters that receive generated readings, in account order.
    pub fn seed_meter_ids(&self) -> impl Iterator<Item = &str> {
        self.meter_accounts.iter().map(|a| a.smart_meter_id.as_str())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::new("server.port", "must be > 0"));
        }

        let seed = &self.seed;
        if seed.enabled && seed.readings_csv.is_none() {
            if seed.readings_per_meter == 0 {
                errors.push(ConfigError::new("seed.readings_per_meter", "must be > 0"));
            } else if seed.readings_per_meter > MAX_READINGS_PER_METER {
                errors.push(ConfigError::new(
                    "seed.readings_per_meter",
                    format!("must be <= {MAX_READINGS_PER_METER}"),
                ));
            }
        }

        if self.price_plans.is_empty() {
            errors.push(ConfigError::new("price_plans", "at least one plan is required"));
        }
        let mut plan_ids = HashSet::new();
        for (i, plan) in self.price_plans.iter().enumerate() {
            if plan.plan_id.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("price_plans[{i}].plan_id"),
                    "cannot be empty",
                ));
            } else if !plan_ids.insert(plan.plan_id.as_str()) {
                errors.push(ConfigError::new(
                    format!("price_plans[{i}].plan_id"),
                    format!("duplicate plan id \"{}\"", plan.plan_id),
                ));
            }
            if !plan.unit_rate.is_finite() || plan.unit_rate <= 0.0 {
                errors.push(ConfigError::new(
                    format!("price_plans[{i}].unit_rate"),
                    "must be a finite number > 0",
                ));
            }
            if plan
                .peak_time_multiplier
                .is_some_and(|m| !m.is_finite() || m <= 0.0)
            {
                errors.push(ConfigError::new(
                    format!("price_plans[{i}].peak_time_multiplier"),
                    "must be a finite number > 0",
                ));
            }
        }

        let mut meter_ids = HashSet::new();
        for (i, account) in self.meter_accounts.iter().enumerate() {
            if account.smart_meter_id.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("meter_accounts[{i}].smart_meter_id"),
                    "cannot be empty",
                ));
            } else if !meter_ids.insert(account.smart_meter_id.as_str()) {
                errors.push(ConfigError::new(
                    format!("meter_accounts[{i}].smart_meter_id"),
                    format!("duplicate meter id \"{}\"", account.smart_meter_id),
                ));
            }
            if !plan_ids.contains(account.price_plan_id.as_str()) {
                errors.push(ConfigError::new(
                    format!("meter_accounts[{i}].price_plan_id"),
                    format!("unknown plan \"{}\"", account.price_plan_id),
                ));
            }
        }

        errors
    }
}

//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use astharhat_ai::AiSettings;
use astharhat_commerce::cart::{
    PricingPolicy, FREE_SHIPPING_THRESHOLD_TAKA, SHIPPING_FEE_TAKA, TAX_PERCENT,
};
use astharhat_commerce::checkout::{DEFAULT_SUBMIT_DELAY, DEFAULT_SUBMIT_TIMEOUT};
use astharhat_commerce::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["astharhat.toml", ".astharhat.toml", "astharhat.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shipping and tax rules.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Order submission.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Generative model connection.
    #[serde(default)]
    pub ai: AiSettings,

    /// Where persisted state lives.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Pricing rules, in whole currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// ISO currency code.
    pub currency: String,

    /// Shipping is free when the subtotal is strictly above this.
    pub free_shipping_threshold: i64,

    /// Flat shipping fee below the threshold.
    pub shipping_fee: i64,

    /// Tax as a percentage of the subtotal.
    pub tax_percent: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::BDT.code().to_string(),
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD_TAKA,
            shipping_fee: SHIPPING_FEE_TAKA,
            tax_percent: TAX_PERCENT,
        }
    }
}

impl PricingConfig {
    /// The configured currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unknown currency in [pricing]: {}", self.currency))
    }

    /// Build the pricing policy.
    pub fn policy(&self) -> Result<PricingPolicy> {
        let currency = self.currency()?;
        if self.free_shipping_threshold < 0 || self.shipping_fee < 0 {
            return Err(anyhow!("[pricing] amounts must not be negative"));
        }
        if !(0.0..=100.0).contains(&self.tax_percent) {
            return Err(anyhow!(
                "[pricing] tax_percent must be between 0 and 100, got {}",
                self.tax_percent
            ));
        }

        Ok(PricingPolicy::new(
            Money::from_major(self.free_shipping_threshold, currency),
            Money::from_major(self.shipping_fee, currency),
            self.tax_percent,
        ))
    }
}

/// Order submission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Simulated processing delay.
    pub submit_delay_ms: u64,

    /// Give up on a submission after this long.
    pub submit_timeout_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: DEFAULT_SUBMIT_DELAY.as_millis() as u64,
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl CheckoutConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory (default: ~/.local/share/astharhat).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// The data directory to use.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Get the platform-specific data directory.
fn default_data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share").join("astharhat")
    } else {
        std::env::temp_dir().join("astharhat")
    }
}

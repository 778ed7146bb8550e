use std::{path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be in (0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("uploads.allowed_mime must list at least one type")]
    NoMimeTypes,
}

/// Runtime settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub lending: LendingConfig,
    pub uploads: UploadConfig,
    pub gates: GateConfig,
    pub timings: Timings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LendingConfig {
    pub annual_rate: f64,
    /// Loan-to-value cap used by the loan setup screen.
    pub loan_max_ltv: f64,
    /// Loan-to-value cap used when fractionalizing an asset.
    pub fraction_max_ltv: f64,
    pub min_amount: u64,
    pub amount_step: u64,
    pub fragments_per_million: u32,
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            annual_rate: 0.05,
            loan_max_ltv: 0.6,
            fraction_max_ltv: 0.8,
            min_amount: 100_000,
            amount_step: 100_000,
            fragments_per_million: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct UploadConfig {
    pub max_file_bytes: u64,
    pub allowed_mime: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * MIB,
            allowed_mime: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "application/pdf".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Distance from the bottom of the contract text, in pixels, that counts as read.
    pub scroll_threshold_px: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 10.0,
        }
    }
}

/// Delays of the simulated operations, in milliseconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Timings {
    pub wallet_connect_ms: u64,
    pub wallet_redirect_ms: u64,
    pub kyc_review_ms: u64,
    pub kyc_redirect_ms: u64,
    pub asset_submit_ms: u64,
    pub custody_in_transit_ms: u64,
    pub custody_inspecting_ms: u64,
    pub custody_completed_ms: u64,
    pub custody_finish_ms: u64,
    pub loan_step_ms: u64,
    pub loan_tick_ms: u64,
    pub loan_redirect_ms: u64,
    pub fraction_step_ms: u64,
    pub fraction_tick_ms: u64,
    pub fraction_redirect_ms: u64,
    pub notice_ttl_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            wallet_connect_ms: 2000,
            wallet_redirect_ms: 1000,
            kyc_review_ms: 2000,
            kyc_redirect_ms: 1500,
            asset_submit_ms: 1500,
            custody_in_transit_ms: 2000,
            custody_inspecting_ms: 4000,
            custody_completed_ms: 6000,
            custody_finish_ms: 6500,
            loan_step_ms: 1500,
            loan_tick_ms: 50,
            loan_redirect_ms: 1000,
            fraction_step_ms: 2000,
            fraction_tick_ms: 80,
            fraction_redirect_ms: 500,
            notice_ttl_ms: 4000,
        }
    }
}

impl Timings {
    /// Every delay divided by `factor`. A factor of zero is treated as one.
    pub fn accelerated(&self, factor: u64) -> Self {
        let f = factor.max(1);
        Self {
            wallet_connect_ms: self.wallet_connect_ms / f,
            wallet_redirect_ms: self.wallet_redirect_ms / f,
            kyc_review_ms: self.kyc_review_ms / f,
            kyc_redirect_ms: self.kyc_redirect_ms / f,
            asset_submit_ms: self.asset_submit_ms / f,
            custody_in_transit_ms: self.custody_in_transit_ms / f,
            custody_inspecting_ms: self.custody_inspecting_ms / f,
            custody_completed_ms: self.custody_completed_ms / f,
            custody_finish_ms: self.custody_finish_ms / f,
            loan_step_ms: self.loan_step_ms / f,
            loan_tick_ms: (self.loan_tick_ms / f).max(1),
            loan_redirect_ms: self.loan_redirect_ms / f,
            fraction_step_ms: self.fraction_step_ms / f,
            fraction_tick_ms: (self.fraction_tick_ms / f).max(1),
            fraction_redirect_ms: self.fraction_redirect_ms / f,
            notice_ttl_ms: self.notice_ttl_ms,
        }
    }
}

pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

impl Config {
    /// Load settings from a TOML file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        tracing::debug!(?path, "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lending = &self.lending;
        for (field, value) in [
            ("lending.annual_rate", lending.annual_rate),
            ("lending.loan_max_ltv", lending.loan_max_ltv),
            ("lending.fraction_max_ltv", lending.fraction_max_ltv),
        ] {
            // NaN fails both comparisons, so it is rejected too.
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }
        if lending.amount_step == 0 {
            return Err(ConfigError::Zero {
                field: "lending.amount_step",
            });
        }
        if lending.fragments_per_million == 0 {
            return Err(ConfigError::Zero {
                field: "lending.fragments_per_million",
            });
        }
        if self.uploads.max_file_bytes == 0 {
            return Err(ConfigError::Zero {
                field: "uploads.max_file_bytes",
            });
        }
        if self.uploads.allowed_mime.is_empty() {
            return Err(ConfigError::NoMimeTypes);
        }
        Ok(())
    }
}

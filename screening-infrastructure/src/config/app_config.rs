use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::Duration;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use screening_domain::DetectionConfig;

use crate::config::validation::{validate_count, validate_multiplier, validate_window};

pub const CONFIG_ENV: &str = "TXSCREEN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub input_path: String,
    pub high_value_threshold: Decimal,
    pub rapid_count: usize,
    pub rapid_window_seconds: u64,
    pub same_merchant_count: usize,
    pub same_merchant_window_seconds: u64,
    pub time_std_multiplier: f64,
    pub spike_window_hours: u64,
    pub spike_multiplier: f64,
    pub min_tx_in_window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: "data/input.csv".to_string(),
            high_value_threshold: Decimal::new(7000, 0),
            rapid_count: 5,
            rapid_window_seconds: 120,
            same_merchant_count: 3,
            same_merchant_window_seconds: 90,
            time_std_multiplier: 2.0,
            spike_window_hours: 3,
            spike_multiplier: 2.0,
            min_tx_in_window: 3,
        }
    }
}

impl AppConfig {
    /// Loads from `TXSCREEN_CONFIG`, or `./config.toml` when unset.
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path)).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", file_path.display(), err))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.input_path = self.input_path.trim().to_string();
        self.high_value_threshold = self.high_value_threshold.normalize();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.input_path = resolve_path(base, &self.input_path);
    }

    pub fn validate(&self) -> Result<()> {
        if self.high_value_threshold.is_sign_negative() {
            return Err(anyhow!("high_value_threshold must not be negative"));
        }
        validate_count("rapid_count", self.rapid_count)?;
        validate_count("same_merchant_count", self.same_merchant_count)?;
        validate_count("min_tx_in_window", self.min_tx_in_window)?;
        validate_window("rapid_window_seconds", self.rapid_window_seconds)?;
        validate_window("same_merchant_window_seconds", self.same_merchant_window_seconds)?;
        validate_window("spike_window_hours", self.spike_window_hours)?;
        validate_multiplier("time_std_multiplier", self.time_std_multiplier)?;
        validate_multiplier("spike_multiplier", self.spike_multiplier)?;
        Ok(())
    }

    pub fn to_detection_config(&self) -> Result<DetectionConfig> {
        Ok(DetectionConfig {
            high_value_threshold: self.high_value_threshold,
            rapid_count: self.rapid_count,
            rapid_window: seconds("rapid_window_seconds", self.rapid_window_seconds)?,
            same_merchant_count: self.same_merchant_count,
            same_merchant_window: seconds(
                "same_merchant_window_seconds",
                self.same_merchant_window_seconds,
            )?,
            time_std_multiplier: self.time_std_multiplier,
            spike_window: hours("spike_window_hours", self.spike_window_hours)?,
            spike_multiplier: self.spike_multiplier,
            min_tx_in_window: self.min_tx_in_window,
        })
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TXSCREEN_INPUT_PATH") {
            self.input_path = value;
        }
        if let Some(value) = lookup("TXSCREEN_HIGH_VALUE_THRESHOLD") {
            self.high_value_threshold = value.trim().parse().unwrap_or(self.high_value_threshold);
        }
        if let Some(value) = lookup("TXSCREEN_RAPID_COUNT") {
            self.rapid_count = value.trim().parse().unwrap_or(self.rapid_count);
        }
        if let Some(value) = lookup("TXSCREEN_RAPID_WINDOW_SECONDS") {
            self.rapid_window_seconds = value.trim().parse().unwrap_or(self.rapid_window_seconds);
        }
        if let Some(value) = lookup("TXSCREEN_SAME_MERCHANT_COUNT") {
            self.same_merchant_count = value.trim().parse().unwrap_or(self.same_merchant_count);
        }
        if let Some(value) = lookup("TXSCREEN_SAME_MERCHANT_WINDOW_SECONDS") {
            self.same_merchant_window_seconds =
                value.trim().parse().unwrap_or(self.same_merchant_window_seconds);
        }
        if let Some(value) = lookup("TXSCREEN_TIME_STD_MULTIPLIER") {
            self.time_std_multiplier = value.trim().parse().unwrap_or(self.time_std_multiplier);
        }
        if let Some(value) = lookup("TXSCREEN_SPIKE_WINDOW_HOURS") {
            self.spike_window_hours = value.trim().parse().unwrap_or(self.spike_window_hours);
        }
        if let Some(value) = lookup("TXSCREEN_SPIKE_MULTIPLIER") {
            self.spike_multiplier = value.trim().parse().unwrap_or(self.spike_multiplier);
        }
        if let Some(value) = lookup("TXSCREEN_MIN_TX_IN_WINDOW") {
            self.min_tx_in_window = value.trim().parse().unwrap_or(self.min_tx_in_window);
        }
    }
}

fn seconds(name: &str, value: u64) -> Result<Duration> {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| anyhow!("{} is out of range", name))
}

fn hours(name: &str, value: u64) -> Result<Duration> {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_hours)
        .ok_or_else(|| anyhow!("{} is out of range", name))
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

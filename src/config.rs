//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section has defaults, so a partial file (or none at all) yields the
//! standard scanner thresholds.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::data::Lookback;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub indicators: IndicatorConfig,
    pub scoring: ScoringConfig,
    pub sources: SourcesConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScannerConfig {
    /// How many admitted candidates to surface.
    pub top_n: usize,
    /// Maximum symbols processed at once.
    pub concurrency: usize,
    pub fetch_timeout_secs: u64,
    pub lookback: Lookback,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            concurrency: 8,
            fetch_timeout_secs: 20,
            lookback: Lookback::OneYear,
        }
    }
}

impl ScannerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Window lengths and thresholds used by the indicator engine.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Trailing bars used for momentum and average volume.
    pub short_window: usize,
    pub ma_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// Distance from the range extreme that still counts as "near" (0.05 = 5%).
    pub proximity_pct: f64,
    /// Prior bars the latest close must exceed for a price breakout.
    pub breakout_lookback: usize,
    pub volume_spike_multiplier: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            short_window: 6,
            ma_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            proximity_pct: 0.05,
            breakout_lookback: 20,
            volume_spike_multiplier: 1.5,
        }
    }
}

/// Thresholds for both recommendation policies and the orchestrator gates.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub momentum_bullish: f64,
    pub momentum_bearish: f64,
    pub rsi_bullish: f64,
    pub rsi_bearish: f64,
    pub strong_buy_min_score: u8,
    pub hold_min_score: u8,
    pub admission_min_momentum: f64,
    pub admission_min_avg_volume: u64,
    pub warning_momentum_loss: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            momentum_bullish: 2.0,
            momentum_bearish: -2.0,
            rsi_bullish: 60.0,
            rsi_bearish: 35.0,
            strong_buy_min_score: 4,
            hold_min_score: 2,
            admission_min_momentum: 3.0,
            admission_min_avg_volume: 1_000_000,
            warning_momentum_loss: -1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    pub chart_base_url: String,
    pub universe_url: String,
    /// Exchange suffix appended to live universe codes.
    pub symbol_suffix: String,
    pub fallback_universe: Vec<String>,
    pub holdings_path: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            chart_base_url: "https://query1.finance.yahoo.com".to_string(),
            universe_url: "https://archives.nseindia.com/content/equities/EQUITY_L.csv"
                .to_string(),
            symbol_suffix: ".NS".to_string(),
            fallback_universe: ["RELIANCE.NS", "INFY.NS", "TCS.NS", "HDFCBANK.NS", "ICICIBANK.NS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            holdings_path: "invested_stocks.csv".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise use defaults.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!(path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let ind = &self.indicators;
        if ind.short_window < 2 {
            anyhow::bail!("indicators.short_window must be at least 2");
        }
        if ind.ma_period == 0 || ind.rsi_period == 0 || ind.breakout_lookback == 0 {
            anyhow::bail!("indicator periods must be non-zero");
        }
        if ind.macd_fast == 0 || ind.macd_signal == 0 || ind.macd_fast >= ind.macd_slow {
            anyhow::bail!("macd periods must satisfy 0 < fast < slow and signal > 0");
        }
        if self.scanner.concurrency == 0 {
            anyhow::bail!("scanner.concurrency must be at least 1");
        }
        if self.scanner.fetch_timeout_secs == 0 {
            anyhow::bail!("scanner.fetch_timeout_secs must be at least 1");
        }
        if self.scoring.hold_min_score > self.scoring.strong_buy_min_score {
            anyhow::bail!("scoring.hold_min_score must not exceed strong_buy_min_score");
        }
        Ok(())
    }
}

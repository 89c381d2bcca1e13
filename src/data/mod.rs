//! External data collaborators.
//!
//! Defines the provider traits the scanner consumes and ships concrete
//! implementations for:
//! - Yahoo Finance chart API: daily close/volume history
//! - NSE equity list: the live symbol universe
//! - A delimited holdings file: the user's held symbols
//! - A static universe for fixed symbol lists

pub mod holdings;
pub mod nse;
pub mod yahoo;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

use crate::types::SeriesWindow;

// ---------------------------------------------------------------------------
// Lookback
// ---------------------------------------------------------------------------

/// How much daily history to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Lookback {
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl Lookback {
    /// Range token understood by the chart API.
    pub fn as_range(&self) -> &'static str {
        match self {
            Lookback::FiveDays => "5d",
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_range())
    }
}

// ---------------------------------------------------------------------------
// Provider traits
// ---------------------------------------------------------------------------

/// Source of daily price/volume history.
///
/// Implementations return a validated, chronologically ascending window.
/// Errors carry a [`crate::types::ScanError`] or
/// [`crate::types::ValidationError`] where the cause is known.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch(&self, symbol: &str, lookback: Lookback) -> Result<SeriesWindow>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Source of the reference symbol universe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniverseProvider: Send + Sync {
    async fn list_symbols(&self) -> Result<Vec<String>>;
}

/// Source of the user's held symbols. A missing source is an empty set,
/// not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HoldingsProvider: Send + Sync {
    async fn load_held(&self) -> Result<HashSet<String>>;
}

// ---------------------------------------------------------------------------
// Static universe
// ---------------------------------------------------------------------------

/// A fixed, ordered symbol list.
#[derive(Debug, Clone, Default)]
pub struct StaticUniverse {
    symbols: Vec<String>,
}

impl StaticUniverse {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

#[async_trait]
impl UniverseProvider for StaticUniverse {
    async fn list_symbols(&self) -> Result<Vec<String>> {
        Ok(self.symbols.clone())
    }
}

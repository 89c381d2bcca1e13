//! Shared types for the momentum scanner.
//!
//! These types form the data model used across all modules: the validated
//! price/volume window, the derived indicator set, the score card, and the
//! per-scan report. Indicator, strategy, and engine modules depend on them
//! without depending on each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Series window
// ---------------------------------------------------------------------------

/// A validated, chronologically ordered daily price/volume series for one
/// symbol. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow {
    symbol: String,
    closes: Vec<f64>,
    volumes: Vec<f64>,
}

impl SeriesWindow {
    /// Build a window, rejecting malformed data.
    ///
    /// Ordering is the caller's responsibility; bars are never re-sorted.
    pub fn new(
        symbol: impl Into<String>,
        closes: Vec<f64>,
        volumes: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        if closes.is_empty() || volumes.is_empty() {
            return Err(ValidationError::Empty);
        }
        if closes.len() != volumes.len() {
            return Err(ValidationError::LengthMismatch {
                closes: closes.len(),
                volumes: volumes.len(),
            });
        }

        for (index, &close) in closes.iter().enumerate() {
            if !close.is_finite() {
                return Err(ValidationError::NonFiniteClose { index });
            }
            if close <= 0.0 {
                return Err(ValidationError::NonPositiveClose { index, value: close });
            }
        }

        for (index, &volume) in volumes.iter().enumerate() {
            if !volume.is_finite() {
                return Err(ValidationError::NonFiniteVolume { index });
            }
            if volume < 0.0 {
                return Err(ValidationError::NegativeVolume { index, value: volume });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            closes,
            volumes,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// Number of bars in the window (always >= 1).
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Always false for a constructed window; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent close.
    pub fn last_close(&self) -> f64 {
        self.closes[self.closes.len() - 1]
    }
}

/// Reasons a raw series is rejected before indicator computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("series is empty")]
    Empty,

    #[error("length mismatch: {closes} closes vs {volumes} volumes")]
    LengthMismatch { closes: usize, volumes: usize },

    #[error("close at index {index} is not finite")]
    NonFiniteClose { index: usize },

    #[error("close at index {index} is not positive ({value})")]
    NonPositiveClose { index: usize, value: f64 },

    #[error("volume at index {index} is not finite")]
    NonFiniteVolume { index: usize },

    #[error("volume at index {index} is negative ({value})")]
    NegativeVolume { index: usize, value: f64 },
}

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// Direction of the 20-bar simple moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "UP"),
            Trend::Down => write!(f, "DOWN"),
            Trend::Flat => write!(f, "FLAT"),
        }
    }
}

/// Every derived indicator for one symbol.
///
/// Fields that could not be computed (short history, degenerate prices)
/// hold their neutral default: 0, `Trend::Flat`, or `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub symbol: String,
    /// Percent change of the last close over the previous close.
    pub momentum_5d: f64,
    /// Mean volume over the short window, truncated.
    pub avg_volume_5d: u64,
    pub ma20_trend: Trend,
    /// 0–100; 0 when unavailable.
    pub rsi_14: f64,
    pub macd_bullish: bool,
    pub near_52w_high: bool,
    pub near_52w_low: bool,
    pub breakout_confirmed: bool,
}

impl IndicatorResult {
    /// The fully defaulted result, used when a symbol has no usable data.
    pub fn neutral(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            momentum_5d: 0.0,
            avg_volume_5d: 0,
            ma20_trend: Trend::Flat,
            rsi_14: 0.0,
            macd_bullish: false,
            near_52w_high: false,
            near_52w_low: false,
            breakout_confirmed: false,
        }
    }

    /// Helper to build a test result with neutral values.
    #[cfg(test)]
    pub fn sample(symbol: &str) -> Self {
        Self::neutral(symbol)
    }
}

impl fmt::Display for IndicatorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:+.2}% | vol {} | MA20 {} | RSI {:.1} | MACD {} | 52w {}{} | breakout {}",
            self.symbol,
            self.momentum_5d,
            self.avg_volume_5d,
            self.ma20_trend,
            self.rsi_14,
            if self.macd_bullish { "bull" } else { "bear" },
            if self.near_52w_high { "H" } else { "-" },
            if self.near_52w_low { "L" } else { "-" },
            if self.breakout_confirmed { "yes" } else { "no" },
        )
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Categorical outcome. Candidates use StrongBuy/Hold/Avoid, holdings use
/// BuyMore/Hold/Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    StrongBuy,
    BuyMore,
    Hold,
    Avoid,
    Sell,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::StrongBuy => write!(f, "STRONG BUY"),
            Recommendation::BuyMore => write!(f, "BUY MORE"),
            Recommendation::Hold => write!(f, "HOLD"),
            Recommendation::Avoid => write!(f, "AVOID"),
            Recommendation::Sell => write!(f, "SELL"),
        }
    }
}

/// Score and recommendation for one symbol under one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub symbol: String,
    /// Number of satisfied candidate rules (0–6).
    pub score: u8,
    pub recommendation: Recommendation,
    pub is_held: bool,
    /// Names of the candidate rules that fired.
    pub signals: Vec<String>,
}

impl fmt::Display for ScoreCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] score {}/6", self.symbol, self.recommendation, self.score)?;
        if !self.signals.is_empty() {
            write!(f, " ({})", self.signals.join(", "))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scan report
// ---------------------------------------------------------------------------

/// A candidate that passed the admission gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub symbol: String,
    pub momentum_5d: f64,
}

/// Evaluation of one non-held symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateReport {
    pub card: ScoreCard,
    pub indicators: IndicatorResult,
    pub admitted: bool,
}

/// Evaluation of one held symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingReport {
    pub card: ScoreCard,
    pub indicators: IndicatorResult,
    /// Momentum is fading or the MA20 trend has turned down.
    pub sell_warning: bool,
    /// Set when the indicators are the neutral substitute.
    pub failure: Option<FailureKind>,
}

/// Why a symbol contributed a neutral result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    Fetch,
    Timeout,
    InvalidData,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Fetch => write!(f, "fetch failed"),
            FailureKind::Timeout => write!(f, "timed out"),
            FailureKind::InvalidData => write!(f, "invalid data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Where the scanned universe came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniverseSource {
    Live,
    Fallback,
}

/// Everything one scan produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub universe_source: UniverseSource,
    pub universe_size: usize,
    /// Admitted candidates, momentum descending, truncated to top N.
    pub top_opportunities: Vec<Opportunity>,
    pub candidates: Vec<CandidateReport>,
    pub holdings: Vec<HoldingReport>,
    pub failures: Vec<SymbolFailure>,
}

impl ScanReport {
    /// Holdings flagged as losing momentum.
    pub fn sell_warnings(&self) -> impl Iterator<Item = &HoldingReport> {
        self.holdings.iter().filter(|h| h.sell_warning)
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scan {} | universe {} ({:?}) | candidates {} | opportunities {} | holdings {} | failures {}",
            self.scan_id,
            self.universe_size,
            self.universe_source,
            self.candidates.len(),
            self.top_opportunities.len(),
            self.holdings.len(),
            self.failures.len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Adapter-level errors, carried inside `anyhow` across trait boundaries
/// and classified by the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Fetch error ({symbol}): {message}")]
    Fetch { symbol: String, message: String },

    #[error("No data returned for {0}")]
    NoData(String),

    #[error("Universe unavailable: {0}")]
    Universe(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

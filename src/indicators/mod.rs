//! Technical indicators.
//!
//! Pure, side-effect-free implementations of every indicator the scanner
//! scores on. Each sub-indicator returns `Option<T>`: `None` means "not
//! enough history" (or a degenerate input) and the engine substitutes that
//! field's neutral default. Malformed data never reaches this module; it is
//! rejected when the [`SeriesWindow`] is built.

pub mod average;
pub mod breakout;
pub mod macd;
pub mod momentum;
pub mod range;
pub mod rsi;
pub mod trend;

use crate::config::IndicatorConfig;
use crate::types::{IndicatorResult, SeriesWindow};

/// Computes the full [`IndicatorResult`] for a window.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Compute every indicator independently. Never fails.
    pub fn compute(&self, window: &SeriesWindow) -> IndicatorResult {
        let cfg = &self.config;
        let closes = window.closes();
        let volumes = window.volumes();

        let macd_bullish = macd::macd(closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal)
            .map(|r| r.is_bullish())
            .unwrap_or(false);

        let breakout_confirmed = breakout::breakout(
            closes,
            volumes,
            cfg.breakout_lookback,
            cfg.volume_spike_multiplier,
        )
        .map(|b| b.confirmed())
        .unwrap_or(false);

        IndicatorResult {
            symbol: window.symbol().to_string(),
            momentum_5d: momentum::momentum_pct(closes, cfg.short_window).unwrap_or(0.0),
            avg_volume_5d: momentum::average_volume(volumes, cfg.short_window).unwrap_or(0),
            ma20_trend: trend::ma_trend(closes, cfg.ma_period).unwrap_or_default(),
            rsi_14: rsi::rsi(closes, cfg.rsi_period).unwrap_or(0.0),
            macd_bullish,
            near_52w_high: range::near_high(closes, cfg.proximity_pct).unwrap_or(false),
            near_52w_low: range::near_low(closes, cfg.proximity_pct).unwrap_or(false),
            breakout_confirmed,
        }
    }
}

/// Compute indicators with the standard parameters (6/20/14/12-26-9).
pub fn compute_indicators(window: &SeriesWindow) -> IndicatorResult {
    IndicatorEngine::default().compute(window)
}

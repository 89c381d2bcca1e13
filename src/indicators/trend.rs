//! Moving-average trend direction.

use super::average::sma;
use crate::types::Trend;

/// Compare the `period`-bar SMA at the latest bar with the SMA one bar
/// earlier.
///
/// Needs `period + 1` closes to produce two consecutive averages; returns
/// `None` otherwise.
pub fn ma_trend(closes: &[f64], period: usize) -> Option<Trend> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let latest = sma(closes, period)?;
    let prior = sma(&closes[..closes.len() - 1], period)?;

    Some(if latest > prior {
        Trend::Up
    } else if latest < prior {
        Trend::Down
    } else {
        Trend::Flat
    })
}

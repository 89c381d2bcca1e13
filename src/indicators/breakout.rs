//! Price/volume breakout detection.

use super::average::mean;

/// Both legs of a breakout, reported separately so callers can see which
/// one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakout {
    /// Latest close exceeds the highest of the prior `lookback` closes.
    pub price_breakout: bool,
    /// Latest volume exceeds `multiplier` times the mean of the last
    /// `lookback` volumes (today included).
    pub volume_spike: bool,
}

impl Breakout {
    pub fn confirmed(&self) -> bool {
        self.price_breakout && self.volume_spike
    }
}

/// Evaluate a breakout over the trailing `lookback` bars.
///
/// Needs `lookback + 1` bars; returns `None` otherwise.
pub fn breakout(
    closes: &[f64],
    volumes: &[f64],
    lookback: usize,
    multiplier: f64,
) -> Option<Breakout> {
    let n = closes.len();
    if lookback == 0 || n < lookback + 1 || volumes.len() != n {
        return None;
    }

    let last_close = closes[n - 1];
    let prior_high = closes[n - 1 - lookback..n - 1]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let last_volume = volumes[n - 1];
    let avg_volume = mean(&volumes[n - lookback..])?;

    Some(Breakout {
        price_breakout: last_close > prior_high,
        volume_spike: last_volume > avg_volume * multiplier,
    })
}

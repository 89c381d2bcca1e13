//! MACD (Moving Average Convergence Divergence).
//!
//! MACD   = EMA(fast) - EMA(slow)
//! Signal = EMA(signal) of the MACD line

use super::average::ema_series;

/// Latest MACD and signal values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
}

impl MacdReading {
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }

    /// MACD line above its signal line.
    pub fn is_bullish(&self) -> bool {
        self.macd > self.signal
    }
}

/// Compute the latest MACD reading.
///
/// Needs at least `slow` closes; returns `None` otherwise or on non-finite
/// intermediate values.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Option<MacdReading> {
    if fast == 0 || slow == 0 || signal == 0 || closes.len() < slow {
        return None;
    }

    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);
    if fast_ema.len() != closes.len() || slow_ema.len() != closes.len() {
        return None;
    }

    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema_series(&line, signal);

    Some(MacdReading {
        macd: *line.last()?,
        signal: *signal_line.last()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_insufficient() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        assert!(macd(&closes, 12, 26, 9).is_none());
    }

    #[test]
    fn test_macd_flat_not_bullish() {
        let r = macd(&[100.0; 40], 12, 26, 9).unwrap();
        assert!(r.macd.abs() < 1e-12);
        assert!(!r.is_bullish());
    }

    #[test]
    fn test_macd_rising_is_bullish() {
        let closes: Vec<f64> = (1..=60).map(|x| x as f64).collect();
        let r = macd(&closes, 12, 26, 9).unwrap();
        assert!(r.macd > 0.0);
        assert!(r.is_bullish());
        assert!(r.histogram() > 0.0);
    }

    #[test]
    fn test_macd_falling_is_bearish() {
        let closes: Vec<f64> = (1..=60).rev().map(|x| x as f64).collect();
        let r = macd(&closes, 12, 26, 9).unwrap();
        assert!(r.macd < 0.0);
        assert!(!r.is_bullish());
    }

    #[test]
    fn test_macd_reversal_crosses_below() {
        // Long rise then a sharp drop: MACD falls under its lagging signal.
        let mut closes: Vec<f64> = (1..=50).map(|x| x as f64).collect();
        closes.extend((0..8).map(|i| 45.0 - i as f64 * 3.0));
        let r = macd(&closes, 12, 26, 9).unwrap();
        assert!(!r.is_bullish());
    }
}

//! Relative Strength Index.
//!
//! RSI = 100 - 100 / (1 + RS), where RS is the simple average of upward
//! moves over the simple average of downward moves across the last
//! `period` price changes.

/// RSI over the last `period` changes.
///
/// Returns `None` when fewer than `period` changes exist (`period + 1`
/// closes). Only gains gives 100; no movement at all gives 50.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let recent = &closes[closes.len() - (period + 1)..];
    let (gains, losses) = recent.windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
        let change = w[1] - w[0];
        if change > 0.0 {
            (g + change, l)
        } else {
            (g, l - change)
        }
    });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    let value = if avg_gain == 0.0 && avg_loss == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    value.is_finite().then_some(value)
}

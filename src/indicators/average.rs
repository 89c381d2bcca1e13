//! Moving-average primitives shared by the trend, MACD, and breakout
//! indicators.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    m.is_finite().then_some(m)
}

/// Simple moving average of the last `period` values.
///
/// `None` when `period == 0` or fewer than `period` values are available.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Exponential moving average series for the given `span`.
///
/// Uses `multiplier = 2 / (span + 1)` and seeds with the first value, so the
/// output has one element per input element. Returns an empty vec for
/// `span == 0`, empty input, or when a non-finite value is encountered.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    if !prev.is_finite() {
        return Vec::new();
    }
    result.push(prev);

    for &v in &values[1..] {
        let ema = v * k + prev * (1.0 - k);
        if !ema.is_finite() {
            return Vec::new();
        }
        result.push(ema);
        prev = ema;
    }

    result
}

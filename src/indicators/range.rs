//! Proximity to the high/low of the available window (52 weeks for a
//! one-year lookback).

/// Latest close within `pct` of the window's highest close.
pub fn near_high(closes: &[f64], pct: f64) -> Option<bool> {
    let last = *closes.last()?;
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return None;
    }
    Some((max - last) / max < pct)
}

/// Latest close within `pct` above the window's lowest close.
pub fn near_low(closes: &[f64], pct: f64) -> Option<bool> {
    let last = *closes.last()?;
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    if min <= 0.0 || !min.is_finite() {
        return None;
    }
    Some((last - min) / min < pct)
}

//! Short-window momentum and liquidity.

/// Percent change of the last close over the previous close, taken from the
/// trailing `window` bars.
///
/// Returns `None` with fewer than two bars in the window or when the previous
/// close is zero.
pub fn momentum_pct(closes: &[f64], window: usize) -> Option<f64> {
    let tail = &closes[closes.len().saturating_sub(window)..];
    if tail.len() < 2 {
        return None;
    }

    let last = tail[tail.len() - 1];
    let prev = tail[tail.len() - 2];
    if prev == 0.0 {
        return None;
    }

    let pct = (last - prev) / prev * 100.0;
    pct.is_finite().then_some(pct)
}

/// Mean volume over the trailing `window` bars (all bars if fewer),
/// truncated to an integer.
pub fn average_volume(volumes: &[f64], window: usize) -> Option<u64> {
    let tail = &volumes[volumes.len().saturating_sub(window)..];
    if tail.is_empty() {
        return None;
    }
    let avg = tail.iter().sum::<f64>() / tail.len() as f64;
    if !avg.is_finite() || avg < 0.0 {
        return None;
    }
    Some(avg.trunc() as u64)
}

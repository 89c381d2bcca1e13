//! Orchestrator-level filters applied independently of the score: the
//! liquidity-aware admission gate for new candidates and the momentum-loss
//! warning for holdings.

use crate::config::ScoringConfig;
use crate::types::{IndicatorResult, Trend};

/// A non-held symbol is an opportunity only with strong momentum, enough
/// volume, and a rising MA20.
pub fn admits(r: &IndicatorResult, cfg: &ScoringConfig) -> bool {
    r.momentum_5d >= cfg.admission_min_momentum
        && r.avg_volume_5d >= cfg.admission_min_avg_volume
        && r.ma20_trend == Trend::Up
}

/// A held symbol is losing momentum when the last bar fell past the loss
/// threshold or the MA20 has turned down.
pub fn sell_warning(r: &IndicatorResult, cfg: &ScoringConfig) -> bool {
    r.momentum_5d < cfg.warning_momentum_loss || r.ma20_trend == Trend::Down
}

//! Scoring engine: reduces an indicator set to a score and a recommendation.
//!
//! Two policies over the tables in [`rules`]. New candidates are scored by counting
//! satisfied bullish rules; held positions are judged risk-first, where any
//! single weakness forces a sell and adding to the position needs every
//! strong signal at once.

pub mod gate;
pub mod rules;

use tracing::debug;

use crate::config::ScoringConfig;
use crate::types::{IndicatorResult, Recommendation, ScoreCard};
use rules::{BUY_MORE_REQUIREMENTS, CANDIDATE_RULES, SELL_TRIGGERS};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Which recommendation policy applies to a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationPolicy {
    /// Not held: score-threshold policy.
    Candidate,
    /// Already held: sell-first policy.
    Held,
}

impl RecommendationPolicy {
    pub fn for_holding(is_held: bool) -> Self {
        if is_held {
            Self::Held
        } else {
            Self::Candidate
        }
    }

    pub fn is_held(&self) -> bool {
        matches!(self, Self::Held)
    }

    fn recommend(&self, r: &IndicatorResult, score: u8, cfg: &ScoringConfig) -> Recommendation {
        match self {
            Self::Candidate => {
                if score >= cfg.strong_buy_min_score {
                    Recommendation::StrongBuy
                } else if score >= cfg.hold_min_score {
                    Recommendation::Hold
                } else {
                    Recommendation::Avoid
                }
            }
            Self::Held => {
                // Sell is checked first and wins over any bullish signal.
                if SELL_TRIGGERS.iter().any(|rule| rule.holds(r, cfg)) {
                    Recommendation::Sell
                } else if BUY_MORE_REQUIREMENTS.iter().all(|rule| rule.holds(r, cfg)) {
                    Recommendation::BuyMore
                } else {
                    Recommendation::Hold
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Applies a [`RecommendationPolicy`] with a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one indicator set. `score` is always the candidate rule count,
    /// held symbols included.
    pub fn score(&self, r: &IndicatorResult, policy: RecommendationPolicy) -> ScoreCard {
        let score = rules::weighted_score(CANDIDATE_RULES, r, &self.config);
        let signals = rules::satisfied(CANDIDATE_RULES, r, &self.config);
        let recommendation = policy.recommend(r, score, &self.config);

        debug!(
            symbol = %r.symbol,
            policy = ?policy,
            score,
            recommendation = %recommendation,
            "Scored"
        );

        ScoreCard {
            symbol: r.symbol.clone(),
            score,
            recommendation,
            is_held: policy.is_held(),
            signals: signals.into_iter().map(String::from).collect(),
        }
    }

    pub fn score_candidate(&self, r: &IndicatorResult) -> ScoreCard {
        self.score(r, RecommendationPolicy::Candidate)
    }

    pub fn score_held(&self, r: &IndicatorResult) -> ScoreCard {
        self.score(r, RecommendationPolicy::Held)
    }

    /// Candidate admission gate (see [`gate::admits`]).
    pub fn admits(&self, r: &IndicatorResult) -> bool {
        gate::admits(r, &self.config)
    }

    /// Holding momentum-loss warning (see [`gate::sell_warning`]).
    pub fn sell_warning(&self, r: &IndicatorResult) -> bool {
        gate::sell_warning(r, &self.config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    fn all_bullish() -> IndicatorResult {
        IndicatorResult {
            symbol: "INFY.NS".into(),
            momentum_5d: 4.0,
            avg_volume_5d: 2_000_000,
            ma20_trend: Trend::Up,
            rsi_14: 70.0,
            macd_bullish: true,
            near_52w_high: true,
            near_52w_low: false,
            breakout_confirmed: true,
        }
    }

    /// Flip the i-th candidate condition on, starting from a neutral result.
    fn set_condition(r: &mut IndicatorResult, i: usize, on: bool) {
        match i {
            0 => r.momentum_5d = if on { 5.0 } else { 0.0 },
            1 => r.ma20_trend = if on { Trend::Up } else { Trend::Flat },
            2 => r.rsi_14 = if on { 65.0 } else { 50.0 },
            3 => r.macd_bullish = on,
            4 => r.near_52w_high = on,
            5 => r.breakout_confirmed = on,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_candidate_strong_buy() {
        let card = ScoringEngine::default().score_candidate(&all_bullish());
        assert_eq!(card.score, 6);
        assert_eq!(card.recommendation, Recommendation::StrongBuy);
        assert!(!card.is_held);
        assert_eq!(card.signals.len(), 6);
    }

    #[test]
    fn test_candidate_thresholds() {
        let engine = ScoringEngine::default();
        let mut r = IndicatorResult::sample("X");
        let expected = [
            Recommendation::Avoid,
            Recommendation::Avoid,
            Recommendation::Hold,
            Recommendation::Hold,
            Recommendation::StrongBuy,
            Recommendation::StrongBuy,
            Recommendation::StrongBuy,
        ];
        assert_eq!(engine.score_candidate(&r).recommendation, expected[0]);
        for i in 0..6 {
            set_condition(&mut r, i, true);
            let card = engine.score_candidate(&r);
            assert_eq!(card.score as usize, i + 1);
            assert_eq!(card.recommendation, expected[i + 1], "score {}", i + 1);
        }
    }

    #[test]
    fn test_candidate_score_monotone() {
        let engine = ScoringEngine::default();
        // Every subset of the six conditions; flipping any one on never lowers the score.
        for mask in 0u32..64 {
            let mut base = IndicatorResult::sample("X");
            for i in 0..6 {
                set_condition(&mut base, i, mask & (1 << i) != 0);
            }
            let before = engine.score_candidate(&base).score;
            for i in 0..6 {
                let mut flipped = base.clone();
                set_condition(&mut flipped, i, true);
                assert!(engine.score_candidate(&flipped).score >= before);
            }
        }
    }

    #[test]
    fn test_held_single_weakness_forces_sell() {
        let mut r = all_bullish();
        r.momentum_5d = -3.0;
        let card = ScoringEngine::default().score_held(&r);
        assert_eq!(card.recommendation, Recommendation::Sell);
        assert!(card.is_held);
    }

    #[test]
    fn test_held_each_trigger_alone() {
        let engine = ScoringEngine::default();

        let mut r = all_bullish();
        r.rsi_14 = 34.0;
        assert_eq!(engine.score_held(&r).recommendation, Recommendation::Sell);

        let mut r = all_bullish();
        r.ma20_trend = Trend::Flat;
        assert_eq!(engine.score_held(&r).recommendation, Recommendation::Sell);

        let mut r = all_bullish();
        r.ma20_trend = Trend::Down;
        assert_eq!(engine.score_held(&r).recommendation, Recommendation::Sell);
    }

    #[test]
    fn test_held_buy_more_needs_all_four() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.score_held(&all_bullish()).recommendation, Recommendation::BuyMore);

        let mut r = all_bullish();
        r.macd_bullish = false;
        assert_eq!(engine.score_held(&r).recommendation, Recommendation::Hold);

        let mut r = all_bullish();
        r.momentum_5d = 1.0;
        assert_eq!(engine.score_held(&r).recommendation, Recommendation::Hold);

        let mut r = all_bullish();
        r.rsi_14 = 50.0;
        assert_eq!(engine.score_held(&r).recommendation, Recommendation::Hold);
    }

    #[test]
    fn test_held_ignores_score() {
        // Score 3, no sell trigger, buy-more incomplete: Hold.
        let mut r = IndicatorResult::sample("X");
        r.ma20_trend = Trend::Up;
        r.rsi_14 = 50.0;
        r.near_52w_high = true;
        r.breakout_confirmed = true;
        let card = ScoringEngine::default().score_held(&r);
        assert_eq!(card.score, 3);
        assert_eq!(card.recommendation, Recommendation::Hold);
    }

    #[test]
    fn test_policy_selection() {
        assert_eq!(RecommendationPolicy::for_holding(true), RecommendationPolicy::Held);
        assert_eq!(RecommendationPolicy::for_holding(false), RecommendationPolicy::Candidate);
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = ScoringEngine::new(ScoringConfig {
            strong_buy_min_score: 2,
            ..ScoringConfig::default()
        });
        let mut r = IndicatorResult::sample("X");
        r.macd_bullish = true;
        r.near_52w_high = true;
        assert_eq!(engine.score_candidate(&r).recommendation, Recommendation::StrongBuy);
    }
}

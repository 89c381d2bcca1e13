//! Declarative rule tables for both recommendation policies.
//!
//! Each rule pairs a name with a weight and a predicate over the indicator
//! set and the scoring thresholds. Policies differ only in how they reduce
//! a table: weighted sum (candidates), any-of (sell triggers), or all-of
//! (buy-more requirements).

use crate::config::ScoringConfig;
use crate::types::{IndicatorResult, Trend};

/// One scoring condition.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub weight: u8,
    pub test: fn(&IndicatorResult, &ScoringConfig) -> bool,
}

impl Rule {
    pub fn holds(&self, r: &IndicatorResult, cfg: &ScoringConfig) -> bool {
        (self.test)(r, cfg)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Candidate scoring: one point per satisfied rule (0–6).
pub const CANDIDATE_RULES: &[Rule] = &[
    Rule {
        name: "momentum",
        weight: 1,
        test: |r, c| r.momentum_5d > c.momentum_bullish,
    },
    Rule {
        name: "ma20_up",
        weight: 1,
        test: |r, _| r.ma20_trend == Trend::Up,
    },
    Rule {
        name: "rsi_strong",
        weight: 1,
        test: |r, c| r.rsi_14 > c.rsi_bullish,
    },
    Rule {
        name: "macd_bullish",
        weight: 1,
        test: |r, _| r.macd_bullish,
    },
    Rule {
        name: "near_52w_high",
        weight: 1,
        test: |r, _| r.near_52w_high,
    },
    Rule {
        name: "breakout",
        weight: 1,
        test: |r, _| r.breakout_confirmed,
    },
];

/// Any one of these forces `Sell` on a held symbol.
pub const SELL_TRIGGERS: &[Rule] = &[
    Rule {
        name: "momentum_loss",
        weight: 1,
        test: |r, c| r.momentum_5d < c.momentum_bearish,
    },
    Rule {
        name: "rsi_weak",
        weight: 1,
        test: |r, c| r.rsi_14 < c.rsi_bearish,
    },
    Rule {
        name: "ma20_not_up",
        weight: 1,
        test: |r, _| r.ma20_trend != Trend::Up,
    },
];

/// All of these are required for `BuyMore` on a held symbol.
pub const BUY_MORE_REQUIREMENTS: &[Rule] = &[
    Rule {
        name: "momentum",
        weight: 1,
        test: |r, c| r.momentum_5d > c.momentum_bullish,
    },
    Rule {
        name: "rsi_strong",
        weight: 1,
        test: |r, c| r.rsi_14 > c.rsi_bullish,
    },
    Rule {
        name: "ma20_up",
        weight: 1,
        test: |r, _| r.ma20_trend == Trend::Up,
    },
    Rule {
        name: "macd_bullish",
        weight: 1,
        test: |r, _| r.macd_bullish,
    },
];

/// Names of the rules in `table` that hold.
pub fn satisfied(table: &[Rule], r: &IndicatorResult, cfg: &ScoringConfig) -> Vec<&'static str> {
    table
        .iter()
        .filter(|rule| rule.holds(r, cfg))
        .map(|rule| rule.name)
        .collect()
}

/// Sum of weights of the rules in `table` that hold.
pub fn weighted_score(table: &[Rule], r: &IndicatorResult, cfg: &ScoringConfig) -> u8 {
    table
        .iter()
        .filter(|rule| rule.holds(r, cfg))
        .map(|rule| rule.weight)
        .sum()
}

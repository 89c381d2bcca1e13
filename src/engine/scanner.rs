//! Scan orchestrator.
//!
//! Resolves the symbol universe and the held set, analyzes every symbol
//! (fetch → indicators → policy) with bounded concurrency, and assembles a
//! [`ScanReport`]: ranked opportunities among non-held symbols plus a
//! recommendation for every holding.
//!
//! Per-symbol failures (fetch errors, timeouts, malformed data) are contained
//! at the symbol: it contributes a neutral indicator set and a failure record,
//! and the rest of the scan proceeds.

use anyhow::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{AppConfig, ScannerConfig};
use crate::data::{HoldingsProvider, MarketDataProvider, UniverseProvider};
use crate::indicators::IndicatorEngine;
use crate::strategy::ScoringEngine;
use crate::types::{
    CandidateReport, FailureKind, HoldingReport, IndicatorResult, Opportunity, ScanReport,
    SeriesWindow, SymbolFailure, UniverseSource, ValidationError,
};

// ---------------------------------------------------------------------------
// Per-symbol analysis
// ---------------------------------------------------------------------------

/// Indicators for one symbol, or the neutral substitute plus the reason.
#[derive(Debug, Clone)]
struct Analysis {
    indicators: IndicatorResult,
    failure: Option<SymbolFailure>,
}

impl Analysis {
    fn failed(symbol: &str, kind: FailureKind, message: String) -> Self {
        Self {
            indicators: IndicatorResult::neutral(symbol),
            failure: Some(SymbolFailure {
                symbol: symbol.to_string(),
                kind,
                message,
            }),
        }
    }
}

/// Classify a provider error by the typed cause it carries.
fn classify(err: &anyhow::Error) -> FailureKind {
    if err.downcast_ref::<ValidationError>().is_some() {
        FailureKind::InvalidData
    } else {
        FailureKind::Fetch
    }
}

/// Momentum descending; equal momentum falls back to symbol order.
fn rank(opportunities: &mut Vec<Opportunity>, top_n: usize) {
    opportunities.sort_by(|a, b| {
        b.momentum_5d
            .partial_cmp(&a.momentum_5d)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    opportunities.truncate(top_n);
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct ScanOrchestrator {
    scanner: ScannerConfig,
    indicators: IndicatorEngine,
    scoring: ScoringEngine,
    fallback_universe: Vec<String>,
    market_data: Arc<dyn MarketDataProvider>,
    universe: Arc<dyn UniverseProvider>,
    holdings: Arc<dyn HoldingsProvider>,
}

impl ScanOrchestrator {
    pub fn new(
        config: &AppConfig,
        market_data: Arc<dyn MarketDataProvider>,
        universe: Arc<dyn UniverseProvider>,
        holdings: Arc<dyn HoldingsProvider>,
    ) -> Self {
        Self {
            scanner: config.scanner.clone(),
            indicators: IndicatorEngine::new(config.indicators.clone()),
            scoring: ScoringEngine::new(config.scoring.clone()),
            fallback_universe: config.sources.fallback_universe.clone(),
            market_data,
            universe,
            holdings,
        }
    }

    /// Run one full scan. Never fails: every collaborator failure degrades
    /// to a fallback or a per-symbol neutral result.
    pub async fn scan(&self) -> ScanReport {
        let scan_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%scan_id, "Starting momentum scan");

        let (universe, universe_source) = self.resolve_universe().await;
        let held = self.resolve_held().await;

        // Non-held universe symbols, first occurrence wins.
        let mut seen = HashSet::new();
        let candidate_symbols: Vec<String> = universe
            .iter()
            .filter(|s| !held.contains(*s) && seen.insert(s.as_str()))
            .cloned()
            .collect();

        info!(
            universe = universe.len(),
            candidates = candidate_symbols.len(),
            held = held.len(),
            "Universe resolved"
        );

        let mut failures = Vec::new();

        // 1. Candidates
        let mut candidates = Vec::with_capacity(candidate_symbols.len());
        let mut opportunities = Vec::new();
        for analysis in self.analyze_all(candidate_symbols).await {
            let card = self.scoring.score_candidate(&analysis.indicators);
            let admitted = analysis.failure.is_none() && self.scoring.admits(&analysis.indicators);

            if admitted {
                info!(
                    symbol = %card.symbol,
                    momentum = format!("{:.2}%", analysis.indicators.momentum_5d),
                    "Potential buy"
                );
                opportunities.push(Opportunity {
                    symbol: card.symbol.clone(),
                    momentum_5d: analysis.indicators.momentum_5d,
                });
            }

            failures.extend(analysis.failure);
            candidates.push(CandidateReport {
                card,
                indicators: analysis.indicators,
                admitted,
            });
        }

        // 2. Rank
        rank(&mut opportunities, self.scanner.top_n);

        // 3. Holdings
        let mut held_symbols: Vec<String> = held.into_iter().collect();
        held_symbols.sort();

        let mut holdings = Vec::with_capacity(held_symbols.len());
        for analysis in self.analyze_all(held_symbols).await {
            let card = self.scoring.score_held(&analysis.indicators);
            let sell_warning = self.scoring.sell_warning(&analysis.indicators);

            if sell_warning {
                warn!(
                    symbol = %card.symbol,
                    momentum = format!("{:.2}%", analysis.indicators.momentum_5d),
                    trend = %analysis.indicators.ma20_trend,
                    "Holding may be losing momentum"
                );
            }

            let failure = analysis.failure.as_ref().map(|f| f.kind);
            failures.extend(analysis.failure);
            holdings.push(HoldingReport {
                card,
                indicators: analysis.indicators,
                sell_warning,
                failure,
            });
        }

        let report = ScanReport {
            scan_id,
            started_at,
            finished_at: Utc::now(),
            universe_source,
            universe_size: universe.len(),
            top_opportunities: opportunities,
            candidates,
            holdings,
            failures,
        };

        info!(
            %scan_id,
            opportunities = report.top_opportunities.len(),
            holdings = report.holdings.len(),
            failures = report.failures.len(),
            "Scan complete"
        );

        report
    }

    // -- Collaborators ---------------------------------------------------

    async fn resolve_universe(&self) -> (Vec<String>, UniverseSource) {
        match self.universe.list_symbols().await {
            Ok(symbols) if !symbols.is_empty() => (symbols, UniverseSource::Live),
            Ok(_) => {
                warn!("Universe provider returned no symbols, using fallback list");
                (self.fallback_universe.clone(), UniverseSource::Fallback)
            }
            Err(e) => {
                warn!(error = %e, "Universe unavailable, using fallback list");
                (self.fallback_universe.clone(), UniverseSource::Fallback)
            }
        }
    }

    async fn resolve_held(&self) -> HashSet<String> {
        self.holdings.load_held().await.unwrap_or_else(|e| {
            warn!(error = format!("{e:#}"), "Holdings unavailable, treating as none");
            HashSet::new()
        })
    }

    // -- Analysis --------------------------------------------------------

    /// Analyze symbols concurrently (bounded), preserving input order.
    async fn analyze_all(&self, symbols: Vec<String>) -> Vec<Analysis> {
        stream::iter(symbols)
            .map(|symbol| async move { self.analyze(&symbol).await })
            .buffered(self.scanner.concurrency.max(1))
            .collect()
            .await
    }

    async fn analyze(&self, symbol: &str) -> Analysis {
        debug!(symbol, "Analysing");

        match self.fetch_with_timeout(symbol).await {
            Ok(window) => Analysis {
                indicators: self.indicators.compute(&window),
                failure: None,
            },
            Err(failure) => {
                warn!(
                    symbol,
                    kind = %failure.kind,
                    error = %failure.message,
                    "Failed to analyse, using neutral result"
                );
                Analysis::failed(symbol, failure.kind, failure.message)
            }
        }
    }

    async fn fetch_with_timeout(&self, symbol: &str) -> Result<SeriesWindow, SymbolFailure> {
        let timeout: Duration = self.scanner.fetch_timeout();
        let fetch = self.market_data.fetch(symbol, self.scanner.lookback);

        match tokio::time::timeout(timeout, fetch).await {
            Ok(Ok(window)) => Ok(window),
            Ok(Err(e)) => Err(SymbolFailure {
                symbol: symbol.to_string(),
                kind: classify(&e),
                message: format!("{e:#}"),
            }),
            Err(_) => Err(SymbolFailure {
                symbol: symbol.to_string(),
                kind: FailureKind::Timeout,
                message: format!("no response within {}s", timeout.as_secs()),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

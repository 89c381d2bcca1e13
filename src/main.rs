//! Momentum scanner entry point.
//!
//! Loads configuration, initialises structured logging, wires the live data
//! providers into the orchestrator, runs one scan, and logs the outcome.
//! Set `MOMENTUM_REPORT_PATH` to also write the full report as JSON.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use momentum_scanner::config::AppConfig;
use momentum_scanner::data::holdings::CsvHoldings;
use momentum_scanner::data::nse::NseUniverse;
use momentum_scanner::data::yahoo::YahooChartClient;
use momentum_scanner::data::MarketDataProvider;
use momentum_scanner::engine::ScanOrchestrator;
use momentum_scanner::types::ScanReport;

const BANNER: &str = r#"
  __  __                            _
 |  \/  | ___  _ __ ___   ___ _ __ | |_ _   _ _ __ ___
 | |\/| |/ _ \| '_ ` _ \ / _ \ '_ \| __| | | | '_ ` _ \
 | |  | | (_) | | | | | |  __/ | | | |_| |_| | | | | | |
 |_|  |_|\___/|_| |_| |_|\___|_| |_|\__|\__,_|_| |_| |_|

  Momentum Scanner v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path =
        std::env::var("MOMENTUM_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = AppConfig::load_or_default(&config_path)?;

    println!("{BANNER}");
    info!(
        config = %config_path,
        lookback = %cfg.scanner.lookback,
        top_n = cfg.scanner.top_n,
        concurrency = cfg.scanner.concurrency,
        "Starting momentum scanner"
    );

    // -- Initialise providers --------------------------------------------

    let market_data = Arc::new(YahooChartClient::new(&cfg.sources.chart_base_url)?);
    info!(provider = market_data.name(), "Market data provider ready");

    let universe = Arc::new(NseUniverse::new(
        &cfg.sources.universe_url,
        &cfg.sources.symbol_suffix,
    )?);
    let holdings = Arc::new(CsvHoldings::new(&cfg.sources.holdings_path));

    let orchestrator = ScanOrchestrator::new(&cfg, market_data, universe, holdings);

    // -- Scan ------------------------------------------------------------

    let report = orchestrator.scan().await;
    log_report(&report);

    if let Ok(path) = std::env::var("MOMENTUM_REPORT_PATH") {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write report to {path}"))?;
        info!(path = %path, "Report written");
    }

    Ok(())
}

/// Log a human-readable scan summary.
fn log_report(report: &ScanReport) {
    info!("Top momentum stocks:");
    if report.top_opportunities.is_empty() {
        info!("  (none passed the admission gate)");
    }
    for (i, op) in report.top_opportunities.iter().enumerate() {
        info!("  {}. {}: {:+.2}% (5-day)", i + 1, op.symbol, op.momentum_5d);
    }

    for c in report.candidates.iter().filter(|c| c.card.score > 0) {
        info!(card = %c.card, "Candidate");
    }

    info!("Checking held stocks for momentum drop:");
    for h in &report.holdings {
        if let Some(kind) = h.failure {
            warn!(symbol = %h.card.symbol, reason = %kind, "No usable data for holding");
        }
        if h.sell_warning {
            warn!(
                "{} may be losing momentum. 5D change: {:.2}%, trend: {} => {}",
                h.card.symbol, h.indicators.momentum_5d, h.indicators.ma20_trend, h.card.recommendation
            );
        } else {
            info!(
                "{} {:+.2}% | RSI {:.1} => {}",
                h.card.symbol, h.indicators.momentum_5d, h.indicators.rsi_14, h.card.recommendation
            );
        }
    }

    for f in &report.failures {
        warn!(symbol = %f.symbol, kind = %f.kind, error = %f.message, "Symbol skipped");
    }

    info!("{report}");
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("momentum_scanner=info"));

    let json_logging = std::env::var("MOMENTUM_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}

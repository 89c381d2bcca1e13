//! Yahoo Finance chart API client.
//!
//! Fetches daily bars from `/v8/finance/chart/{symbol}` and reduces them to
//! a validated [`SeriesWindow`]. Bars with a missing close or volume (holidays,
//! partial sessions) are dropped so both series stay aligned.
//!
//! Base URL: https://query1.finance.yahoo.com
//! Auth: none; a browser-like user agent is required.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Lookback, MarketDataProvider};
use crate::types::{ScanError, SeriesWindow};

const PROVIDER_NAME: &str = "yahoo";
const USER_AGENT: &str = "Mozilla/5.0 (momentum-scanner/0.1.0)";

// ---------------------------------------------------------------------------
// API response types (chart JSON → Rust)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartData>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Daily history client for the Yahoo chart endpoint.
pub struct YahooChartClient {
    http: Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client for Yahoo chart API")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, lookback: Lookback) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url,
            urlencoding::encode(symbol),
            lookback.as_range()
        )
    }
}

/// Turn a chart response body into a window.
fn parse_chart(symbol: &str, body: ChartResponse) -> Result<SeriesWindow> {
    if let Some(err) = body.chart.error {
        return Err(ScanError::Fetch {
            symbol: symbol.to_string(),
            message: format!("[{}] {}", err.code, err.description),
        }
        .into());
    }

    let data = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| ScanError::NoData(symbol.to_string()))?;

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ScanError::NoData(symbol.to_string()))?;

    let (closes, volumes): (Vec<f64>, Vec<f64>) = quote
        .close
        .into_iter()
        .zip(quote.volume)
        .filter_map(|(c, v)| Some((c?, v?)))
        .unzip();

    debug!(
        symbol,
        timestamps = data.timestamp.len(),
        bars = closes.len(),
        "Chart parsed"
    );

    if closes.is_empty() {
        return Err(ScanError::NoData(symbol.to_string()).into());
    }

    Ok(SeriesWindow::new(symbol, closes, volumes)?)
}

#[async_trait]
impl MarketDataProvider for YahooChartClient {
    async fn fetch(&self, symbol: &str, lookback: Lookback) -> Result<SeriesWindow> {
        let url = self.chart_url(symbol, lookback);

        let resp = self.http.get(&url).send().await.map_err(|e| ScanError::Fetch {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })?;

        if !resp.status().is_success() {
            return Err(ScanError::Fetch {
                symbol: symbol.to_string(),
                message: format!("HTTP {}", resp.status()),
            }
            .into());
        }

        let body: ChartResponse = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse chart response for {symbol}"))?;

        parse_chart(symbol, body)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

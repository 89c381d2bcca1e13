//! NSE equity universe.
//!
//! Downloads the exchange's equity list (CSV, first column is the trading
//! code) and converts codes to chart symbols by appending the exchange
//! suffix. A response with fewer than [`MIN_SYMBOLS`] codes is treated as a
//! broken source so the orchestrator falls back to its static list.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::UniverseProvider;
use crate::types::ScanError;

/// Fewer codes than this means the download is not a real equity list.
pub const MIN_SYMBOLS: usize = 10;

const HEADER: &str = "SYMBOL";

pub struct NseUniverse {
    http: Client,
    url: String,
    suffix: String,
}

impl NseUniverse {
    pub fn new(url: impl Into<String>, suffix: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (momentum-scanner/0.1.0)")
            .build()
            .context("Failed to build HTTP client for NSE")?;

        Ok(Self {
            http,
            url: url.into(),
            suffix: suffix.into(),
        })
    }
}

/// Extract suffixed symbols from the equity-list CSV, preserving order.
pub fn parse_equity_list(body: &str, suffix: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ScanError::Universe(format!("malformed equity list: {e}")))?;
        match record.get(0) {
            Some(code) if !code.is_empty() && !code.eq_ignore_ascii_case(HEADER) => {
                symbols.push(format!("{code}{suffix}"));
            }
            _ => {}
        }
    }

    if symbols.len() < MIN_SYMBOLS {
        return Err(ScanError::Universe(format!(
            "expected at least {MIN_SYMBOLS} codes, got {}",
            symbols.len()
        ))
        .into());
    }

    Ok(symbols)
}

#[async_trait]
impl UniverseProvider for NseUniverse {
    async fn list_symbols(&self) -> Result<Vec<String>> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ScanError::Universe(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ScanError::Universe(format!("HTTP {}", resp.status())).into());
        }

        let body = resp.text().await.context("Failed to read NSE equity list")?;
        let symbols = parse_equity_list(&body, &self.suffix)?;

        info!(count = symbols.len(), "Loaded universe from NSE");
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equity_csv(codes: &[&str]) -> String {
        let mut s = String::from("SYMBOL,NAME OF COMPANY, SERIES\n");
        for code in codes {
            s.push_str(&format!("{code},{code} Ltd,EQ\n"));
        }
        s
    }

    #[test]
    fn test_parse_appends_suffix_and_drops_header() {
        let codes = ["RELIANCE", "INFY", "TCS", "HDFCBANK", "ICICIBANK", "SBIN", "ITC", "LT", "AXISBANK", "WIPRO"];
        let symbols = parse_equity_list(&equity_csv(&codes), ".NS").unwrap();
        assert_eq!(symbols.len(), 10);
        assert_eq!(symbols[0], "RELIANCE.NS");
        assert_eq!(symbols[9], "WIPRO.NS");
        assert!(!symbols.iter().any(|s| s.starts_with("SYMBOL")));
    }

    #[test]
    fn test_parse_quoted_company_names() {
        let mut body = String::from("SYMBOL,NAME OF COMPANY,SERIES\n");
        for code in ["BAJAJ-AUTO", "M&M", "L&TFH", "TCS", "INFY", "ITC", "LT", "SBIN", "WIPRO", "TITAN"] {
            body.push_str(&format!("{code},\"{code} Industries, Ltd.\",EQ\n"));
        }
        let symbols = parse_equity_list(&body, ".NS").unwrap();
        assert_eq!(symbols.len(), 10);
        assert_eq!(symbols[0], "BAJAJ-AUTO.NS");
        assert_eq!(symbols[1], "M&M.NS");
    }

    #[test]
    fn test_parse_too_few_codes() {
        let err = parse_equity_list(&equity_csv(&["INFY", "TCS"]), ".NS").unwrap_err();
        assert!(matches!(err.downcast_ref::<ScanError>(), Some(ScanError::Universe(_))));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_quotes() {
        let body = "\"SYMBOL\"\n\n\"A\"\nB\nC\nD\nE\nF\nG\nH\nI\nJ\n";
        let symbols = parse_equity_list(body, "").unwrap();
        assert_eq!(symbols.first().map(String::as_str), Some("A"));
        assert_eq!(symbols.len(), 10);
    }
}

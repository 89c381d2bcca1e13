//! Held-symbol list from a delimited file.
//!
//! The file needs a header row with a `symbol` column (case-insensitive);
//! other columns are ignored. A missing file means no holdings.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::HoldingsProvider;

const SYMBOL_COLUMN: &str = "symbol";

pub struct CsvHoldings {
    path: PathBuf,
}

impl CsvHoldings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse the held-symbol set from file contents.
pub fn parse_holdings(contents: &str) -> Result<HashSet<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader.headers().context("Failed to read holdings header")?.clone();
    if headers.is_empty() {
        return Ok(HashSet::new());
    }

    let column = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(SYMBOL_COLUMN))
        .with_context(|| {
            format!(
                "Holdings header has no '{SYMBOL_COLUMN}' column: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            )
        })?;

    let mut held = HashSet::new();
    for record in reader.records() {
        let record = record.context("Malformed holdings row")?;
        if let Some(symbol) = record.get(column).filter(|s| !s.is_empty()) {
            held.insert(symbol.to_string());
        }
    }
    Ok(held)
}

#[async_trait]
impl HoldingsProvider for CsvHoldings {
    async fn load_held(&self) -> Result<HashSet<String>> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check holdings file {}", self.path.display()))?;
        if !exists {
            warn!(path = %self.path.display(), "Holdings file not found, assuming no holdings");
            return Ok(HashSet::new());
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read holdings from {}", self.path.display()))?;

        let held = parse_holdings(&contents)
            .with_context(|| format!("Failed to parse holdings from {}", self.path.display()))?;

        info!(count = held.len(), path = %self.path.display(), "Loaded held symbols");
        Ok(held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("momentum_holdings_{}.csv", uuid::Uuid::new_v4()));
        p
    }

    #[test]
    fn test_parse_symbol_column() {
        let held = parse_holdings("qty,Symbol,note\n10,INFY.NS,x\n5, TCS.NS ,y\n").unwrap();
        assert_eq!(held.len(), 2);
        assert!(held.contains("INFY.NS"));
        assert!(held.contains("TCS.NS"));
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let held = parse_holdings("symbol\n\nINFY.NS\n,\n\n").unwrap();
        assert_eq!(held, HashSet::from(["INFY.NS".to_string()]));
    }

    #[test]
    fn test_parse_quoted_field_with_comma() {
        let held = parse_holdings("name,symbol\n\"Infosys, Ltd\",INFY.NS\n").unwrap();
        assert_eq!(held, HashSet::from(["INFY.NS".to_string()]));
    }

    #[test]
    fn test_parse_quoted_header() {
        let held = parse_holdings("\"Symbol\",\"Qty\"\n\"TCS.NS\",4\n").unwrap();
        assert!(held.contains("TCS.NS"));
    }

    #[test]
    fn test_parse_missing_column() {
        assert!(parse_holdings("ticker,qty\nINFY.NS,1\n").is_err());
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_holdings("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let holdings = CsvHoldings::new("/tmp/momentum_no_such_holdings_4711.csv");
        assert!(holdings.load_held().await.unwrap().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_location_is_error() {
        // A path under a regular file cannot be stat'ed: ENOTDIR, not "missing".
        let file = temp_path();
        std::fs::write(&file, "symbol\n").unwrap();
        let holdings = CsvHoldings::new(file.join("invested_stocks.csv"));

        assert!(holdings.load_held().await.is_err());

        std::fs::remove_file(&file).unwrap();
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = temp_path();
        std::fs::write(&path, "symbol,quantity\nRELIANCE.NS,3\nHDFCBANK.NS,7\n").unwrap();

        let holdings = CsvHoldings::new(&path);
        let held = holdings.load_held().await.unwrap();
        assert_eq!(held.len(), 2);
        assert!(held.contains("HDFCBANK.NS"));
        assert_eq!(holdings.path(), path.as_path());

        std::fs::remove_file(&path).unwrap();
    }
}

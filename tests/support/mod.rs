//! Deterministic in-memory providers for integration testing.
//!
//! Series are generated from simple shapes so expected indicator outcomes
//! are known in advance. Individual symbols can be forced to fail or hang.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use momentum_scanner::data::{HoldingsProvider, Lookback, MarketDataProvider, UniverseProvider};
use momentum_scanner::types::SeriesWindow;

/// Shape of a generated daily series.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Compounding daily gain (percent) ending in a jump (percent).
    Rally { daily_pct: f64, final_jump_pct: f64, volume: f64 },
    /// Linear decline.
    Slide { volume: f64 },
    /// Flat for 20 bars, then one breakout bar.
    Breakout,
    /// Constant price.
    Flat { volume: f64 },
}

impl Shape {
    pub fn window(&self, symbol: &str) -> SeriesWindow {
        let (closes, volumes) = match *self {
            Shape::Rally { daily_pct, final_jump_pct, volume } => {
                let growth = 1.0 + daily_pct / 100.0;
                let mut closes: Vec<f64> = (0..59).map(|i| 100.0 * growth.powi(i)).collect();
                let last = closes[58] * (1.0 + final_jump_pct / 100.0);
                closes.push(last);
                (closes, vec![volume; 60])
            }
            Shape::Slide { volume } => {
                let closes = (0..60).map(|i| 300.0 - i as f64 * 2.5).collect();
                (closes, vec![volume; 60])
            }
            Shape::Breakout => {
                let mut closes = vec![10.0; 20];
                closes.push(12.0);
                let mut volumes = vec![1000.0; 20];
                volumes.push(5000.0);
                (closes, volumes)
            }
            Shape::Flat { volume } => (vec![50.0; 60], vec![volume; 60]),
        };
        SeriesWindow::new(symbol, closes, volumes).expect("generated series is valid")
    }
}

#[derive(Debug, Clone)]
enum Behaviour {
    Serve(Shape),
    Fail(String),
    Hang,
}

/// Market data keyed by symbol. Unknown symbols fail like a delisted ticker.
#[derive(Default)]
pub struct InMemoryMarket {
    series: HashMap<String, Behaviour>,
    requests: Arc<Mutex<Vec<(String, Lookback)>>>,
}

impl InMemoryMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: &str, shape: Shape) -> Self {
        self.series.insert(symbol.to_string(), Behaviour::Serve(shape));
        self
    }

    pub fn failing(mut self, symbol: &str, message: &str) -> Self {
        self.series.insert(symbol.to_string(), Behaviour::Fail(message.to_string()));
        self
    }

    /// The fetch for `symbol` never completes.
    pub fn hanging(mut self, symbol: &str) -> Self {
        self.series.insert(symbol.to_string(), Behaviour::Hang);
        self
    }

    /// Every (symbol, lookback) requested so far.
    pub fn requests(&self) -> Arc<Mutex<Vec<(String, Lookback)>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarket {
    async fn fetch(&self, symbol: &str, lookback: Lookback) -> Result<SeriesWindow> {
        self.requests.lock().unwrap().push((symbol.to_string(), lookback));
        match self.series.get(symbol) {
            Some(Behaviour::Serve(shape)) => Ok(shape.window(symbol)),
            Some(Behaviour::Fail(msg)) => Err(anyhow!("{}", msg)),
            Some(Behaviour::Hang) => std::future::pending().await,
            None => Err(anyhow!("no data found for {symbol}, symbol may be delisted")),
        }
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

pub struct FixedUniverse(pub Vec<String>);

#[async_trait]
impl UniverseProvider for FixedUniverse {
    async fn list_symbols(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

pub struct BrokenUniverse;

#[async_trait]
impl UniverseProvider for BrokenUniverse {
    async fn list_symbols(&self) -> Result<Vec<String>> {
        Err(anyhow!("exchange endpoint returned 403"))
    }
}

pub struct FixedHoldings(pub HashSet<String>);

impl FixedHoldings {
    pub fn of(symbols: &[&str]) -> Self {
        Self(symbols.iter().map(|s| s.to_string()).collect())
    }
}

#[async_trait]
impl HoldingsProvider for FixedHoldings {
    async fn load_held(&self) -> Result<HashSet<String>> {
        Ok(self.0.clone())
    }
}

pub fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

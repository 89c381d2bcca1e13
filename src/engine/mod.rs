//! Core engine: the scan loop that ties data providers, indicators, and
//! scoring together.

pub mod scanner;

pub use scanner::ScanOrchestrator;

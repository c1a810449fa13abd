//! Catalog Valuation: music-catalog valuation engine.
//!
//! This is the root crate that provides benchmark access to the internal
//! modules. For actual functionality, use the individual crates directly:
//!
//! - `catalog-core`: domain types, numeric formatting, region classification,
//!   model configuration, metrics ingestion
//! - `valuation-engine`: stream estimation, geo-weighted rates, revenue and
//!   valuation calculation

// Re-export for benchmarks
pub use catalog_core as core;
pub use valuation_engine as engine;

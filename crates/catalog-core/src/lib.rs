//! Shared domain types and leaf components for the catalog valuation engine.
//!
//! Everything here is pure and synchronous: magnitude-string parsing, the
//! city-to-region classifier, model configuration, and the input/output types
//! the valuation engine operates on.

pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod region;
pub mod types;

pub use config::{AgeBucket, DecaySchedule, RateTable, ValuationConfig, ValuationMultiples};
pub use error::{Error, Result};
pub use region::{RegionCode, RegionKeywords};
pub use types::{
    ArtistMetrics, ArtistStats, DegradedSignal, EstimationMethod, RateMethod, TopTrack,
    ValuationInputs, ValuationResult,
};

//! Catalog Valuation Engine
//!
//! Deterministic pipeline turning normalized artist metrics into a monthly
//! stream estimate, a geo-weighted effective payout rate, and a set of
//! revenue and valuation figures. Every operation is a pure, synchronous
//! function of its explicit inputs; there is no I/O and no shared state.

pub mod decay;
pub mod estimator;
pub mod geo_rate;
pub mod valuation;

pub use estimator::{StreamEstimate, StreamSignal};
pub use geo_rate::EffectiveRate;
pub use valuation::{ValuationEngine, ValuationReport};

//! Core domain types for catalog valuation.

use crate::region::RegionCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Normalized artist metrics handed over by the data-retrieval collaborator.
///
/// The engine is agnostic to which upstream platform produced these fields;
/// platform-specific extraction is the collaborator's responsibility. Counts
/// may arrive as raw numbers or as human-readable magnitude strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistMetrics {
    pub name: String,
    pub followers: Option<u64>,
    pub popularity: Option<u32>,
    pub top_tracks: Vec<TopTrack>,
    pub stats: Option<ArtistStats>,
    /// Monthly listeners, possibly formatted ("4.1M").
    pub monthly_listeners: Option<String>,
    #[serde(rename = "streams_last_30_days")]
    pub streams_last_30_days: Option<u64>,
    #[serde(rename = "streams_last_28_days")]
    pub streams_last_28_days: Option<u64>,
    /// Top listener locations as free-text "City, Country" labels, each entry
    /// one equally-weighted occurrence.
    pub top_cities: Vec<String>,
}

/// A single top track as reported upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopTrack {
    pub name: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Raw stream count when the platform exposes one.
    pub stream_count: Option<u64>,
    /// Formatted fallback ("150M") when only display text is available.
    pub stream_count_formatted: Option<String>,
    pub popularity: Option<u32>,
}

/// Aggregate stats block some platforms attach to an artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistStats {
    /// Lifetime stream total, possibly formatted ("7.2B").
    pub total_streams: Option<String>,
}

/// Everything one valuation computation consumes.
///
/// Immutable by convention: user edits go through the consuming `with_*`
/// constructors, producing a fresh value for the next computation. The
/// evaluation date is explicit so the computation is a pure function of its
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationInputs {
    pub lifetime_streams: u64,
    pub release_date: NaiveDate,
    pub streams_last_30_days: Option<u64>,
    pub streams_last_28_days: Option<u64>,
    pub top_cities: Vec<String>,
    pub valued_at: NaiveDate,
}

impl ValuationInputs {
    pub fn new(lifetime_streams: u64, release_date: NaiveDate, valued_at: NaiveDate) -> Self {
        Self {
            lifetime_streams,
            release_date,
            streams_last_30_days: None,
            streams_last_28_days: None,
            top_cities: Vec::new(),
            valued_at,
        }
    }

    /// Replace the user-editable lifetime stream count.
    pub fn with_lifetime_streams(mut self, streams: u64) -> Self {
        self.lifetime_streams = streams;
        self
    }

    /// Replace the user-editable release date.
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = date;
        self
    }

    pub fn with_recent_30_day(mut self, streams: u64) -> Self {
        self.streams_last_30_days = Some(streams);
        self
    }

    pub fn with_recent_28_day(mut self, streams: u64) -> Self {
        self.streams_last_28_days = Some(streams);
        self
    }

    pub fn with_top_cities(mut self, cities: Vec<String>) -> Self {
        self.top_cities = cities;
        self
    }
}

/// Which stream signal produced the monthly estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimationMethod {
    /// Trailing-30-day actuals, used directly.
    #[serde(rename = "RECENT_30D")]
    Recent30Day,
    /// Trailing-28-day actuals normalized to a 30-day month.
    #[serde(rename = "RECENT_28D_NORMALIZED")]
    Recent28DayNormalized,
    /// Lifetime run-rate adjusted by the age-decay factor.
    #[serde(rename = "LIFETIME_RUNRATE_ADJ")]
    LifetimeRunRateAdjusted,
}

impl fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            EstimationMethod::Recent30Day => "RECENT_30D",
            EstimationMethod::Recent28DayNormalized => "RECENT_28D_NORMALIZED",
            EstimationMethod::LifetimeRunRateAdjusted => "LIFETIME_RUNRATE_ADJ",
        };
        f.write_str(tag)
    }
}

/// How the effective payout rate was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateMethod {
    /// Geo-weighted across the listener-city sample.
    #[serde(rename = "WEIGHTED")]
    Weighted,
    /// Global default rate, no city data available.
    #[serde(rename = "DEFAULT")]
    Default,
}

impl fmt::Display for RateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RateMethod::Weighted => "WEIGHTED",
            RateMethod::Default => "DEFAULT",
        };
        f.write_str(tag)
    }
}

/// Quality flags recording that the engine had to fall back past its
/// highest-priority signal. Not errors: the figures are still produced, the
/// presentation layer just warns that they are estimates rather than actuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedSignal {
    /// No recent-window actuals; lifetime run-rate used instead.
    LifetimeFallback,
    /// No listener-city data; default rate used instead of geo-weighting.
    DefaultRate,
}

/// The single output of one valuation computation. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub monthly_streams_estimate: u64,
    pub estimation_method: EstimationMethod,
    /// Whole calendar months between release and evaluation date, floored at 1.
    pub months_live: u32,
    /// Decay multiplier, recorded only when the lifetime path was used.
    pub decay_factor: Option<Decimal>,
    pub effective_payout_rate: Decimal,
    pub rate_method: RateMethod,
    /// Region shares of the listener sample, present only when weighted.
    pub region_share_breakdown: Option<BTreeMap<RegionCode, Decimal>>,
    pub monthly_revenue: Decimal,
    /// Last-twelve-months revenue, monthly x 12.
    pub ltm_revenue: Decimal,
    pub conservative_valuation: Decimal,
    pub market_valuation: Decimal,
    pub premium_valuation: Decimal,
    pub degraded: Vec<DegradedSignal>,
}

impl ValuationResult {
    /// True when any fallback was taken and the figures should be presented
    /// as estimates rather than actuals.
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

//! Monthly stream estimation.
//!
//! Exactly one signal drives the estimate, chosen by fixed priority: recent
//! 30-day actuals beat recent 28-day actuals beat the lifetime run-rate.
//! There is no further fallback; an artist with zero lifetime streams simply
//! estimates to zero monthly streams.

use crate::decay;
use catalog_core::{DecaySchedule, EstimationMethod, ValuationInputs};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The estimation inputs available for an artist; exactly one is selected per
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamSignal {
    Recent30Day { count: u64 },
    Recent28Day { count: u64 },
    LifetimeWithRelease {
        total_streams: u64,
        release_date: NaiveDate,
    },
}

impl StreamSignal {
    /// Pick the highest-priority signal present in the inputs.
    pub fn select(inputs: &ValuationInputs) -> Self {
        if let Some(count) = inputs.streams_last_30_days {
            StreamSignal::Recent30Day { count }
        } else if let Some(count) = inputs.streams_last_28_days {
            StreamSignal::Recent28Day { count }
        } else {
            StreamSignal::LifetimeWithRelease {
                total_streams: inputs.lifetime_streams,
                release_date: inputs.release_date,
            }
        }
    }
}

/// Monthly stream estimate with the provenance the presentation layer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEstimate {
    pub monthly_streams: u64,
    pub method: EstimationMethod,
    pub months_live: u32,
    /// Recorded only when the lifetime run-rate path was taken.
    pub decay_factor: Option<Decimal>,
}

/// Estimate monthly streams from the best available signal.
pub fn estimate(inputs: &ValuationInputs, decay_schedule: &DecaySchedule) -> StreamEstimate {
    let months_live = decay::months_live(inputs.release_date, inputs.valued_at);

    match StreamSignal::select(inputs) {
        StreamSignal::Recent30Day { count } => StreamEstimate {
            monthly_streams: count,
            method: EstimationMethod::Recent30Day,
            months_live,
            decay_factor: None,
        },
        StreamSignal::Recent28Day { count } => {
            let normalized = Decimal::from(count) * Decimal::from(30) / Decimal::from(28);
            StreamEstimate {
                monthly_streams: round_streams(normalized),
                method: EstimationMethod::Recent28DayNormalized,
                months_live,
                decay_factor: None,
            }
        }
        StreamSignal::LifetimeWithRelease { total_streams, .. } => {
            let factor = decay_schedule.factor_for(months_live);
            let average_monthly = Decimal::from(total_streams) / Decimal::from(months_live);
            let adjusted = average_monthly * factor;
            debug!(
                months_live,
                decay_factor = %factor,
                "no recent-window actuals, using decayed lifetime run-rate"
            );
            StreamEstimate {
                monthly_streams: round_streams(adjusted),
                method: EstimationMethod::LifetimeRunRateAdjusted,
                months_live,
                decay_factor: Some(factor),
            }
        }
    }
}

fn round_streams(value: Decimal) -> u64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

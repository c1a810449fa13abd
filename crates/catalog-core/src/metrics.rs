//! Derivation of initial valuation inputs from upstream artist metrics.
//!
//! The user can edit the lifetime stream count and release date afterwards;
//! this module only seeds the starting values. Scraped magnitude strings that
//! fail to parse are skipped with a warning and the derivation falls through
//! to the next signal in the chain, unlike user-edited input which fails hard
//! at the editing boundary.

use crate::format;
use crate::types::{ArtistMetrics, TopTrack, ValuationInputs};
use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Streams-per-listener heuristic used when only a monthly-listener figure is
/// known: an average listener contributes ~15 streams a month, projected over
/// a year of listening history.
const STREAMS_PER_LISTENER_PER_MONTH: u64 = 15;
const MONTHS_PROJECTED: u64 = 12;

/// Build the initial inputs for an artist, valued as of the given date.
pub fn initial_inputs(metrics: &ArtistMetrics, valued_at: NaiveDate) -> ValuationInputs {
    let release_date =
        mean_release_date(&metrics.top_tracks).unwrap_or_else(fallback_release_date);

    let mut inputs = ValuationInputs::new(lifetime_streams(metrics), release_date, valued_at)
        .with_top_cities(metrics.top_cities.clone());
    inputs.streams_last_30_days = metrics.streams_last_30_days;
    inputs.streams_last_28_days = metrics.streams_last_28_days;
    inputs
}

/// Best available lifetime stream total for an artist.
///
/// Fallback chain: platform stats total, sum over top tracks, monthly
/// listeners x 15 x 12, zero.
pub fn lifetime_streams(metrics: &ArtistMetrics) -> u64 {
    if let Some(total) = metrics.stats.as_ref().and_then(|s| s.total_streams.as_deref()) {
        match format::parse_stream_count(total) {
            Ok(streams) => return streams,
            Err(e) => warn!(error = %e, "skipping unparseable lifetime stream total"),
        }
    }

    let from_tracks = top_track_total(&metrics.top_tracks);
    if from_tracks > 0 {
        return from_tracks;
    }

    if let Some(listeners) = metrics.monthly_listeners.as_deref() {
        match format::parse_count(listeners) {
            Ok(listeners) => {
                let projected =
                    listeners * Decimal::from(STREAMS_PER_LISTENER_PER_MONTH * MONTHS_PROJECTED);
                return to_streams(projected);
            }
            Err(e) => warn!(error = %e, "skipping unparseable monthly listeners"),
        }
    }

    0
}

/// Mean release date across the top tracks that carry one.
pub fn mean_release_date(tracks: &[TopTrack]) -> Option<NaiveDate> {
    let dates: Vec<NaiveDate> = tracks.iter().filter_map(|t| t.release_date).collect();
    if dates.is_empty() {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let total_days: i64 = dates
        .iter()
        .map(|d| d.signed_duration_since(epoch).num_days())
        .sum();
    let mean_days = (total_days as f64 / dates.len() as f64).round() as i64;
    epoch.checked_add_signed(Duration::days(mean_days))
}

/// Release date assumed when no top track carries one.
fn fallback_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default()
}

fn top_track_total(tracks: &[TopTrack]) -> u64 {
    let mut total: u64 = 0;
    for track in tracks {
        if let Some(count) = track.stream_count {
            total = total.saturating_add(count);
        } else if let Some(formatted) = track.stream_count_formatted.as_deref() {
            match format::parse_stream_count(formatted) {
                Ok(count) => total = total.saturating_add(count),
                Err(e) => warn!(error = %e, "skipping unparseable track stream count"),
            }
        }
    }
    total
}

fn to_streams(value: Decimal) -> u64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

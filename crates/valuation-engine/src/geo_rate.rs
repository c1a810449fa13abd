//! Geo-weighted effective payout rate.
//!
//! Each listener city counts as one equally-weighted occurrence. Shares are
//! computed over exactly the regions observed in the sample; regions absent
//! from the sample contribute nothing rather than an implicit share.

use catalog_core::{RateMethod, RateTable, RegionCode, RegionKeywords};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Effective per-stream rate plus the provenance of how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRate {
    pub rate: Decimal,
    pub method: RateMethod,
    /// Region shares of the sample, present only when weighted. Shares sum
    /// to 1 up to division rounding.
    pub breakdown: Option<BTreeMap<RegionCode, Decimal>>,
}

/// Weight the rate table by the regional makeup of the listener-city sample.
///
/// An empty sample falls back to the table's global default rate.
pub fn effective_rate(
    cities: &[String],
    keywords: &RegionKeywords,
    rates: &RateTable,
) -> EffectiveRate {
    if cities.is_empty() {
        debug!("no listener-city sample, using default payout rate");
        return EffectiveRate {
            rate: rates.default_rate,
            method: RateMethod::Default,
            breakdown: None,
        };
    }

    let mut counts: BTreeMap<RegionCode, u64> = BTreeMap::new();
    for city in cities {
        *counts.entry(keywords.classify(city)).or_insert(0) += 1;
    }

    let total = Decimal::from(cities.len());
    let mut shares = BTreeMap::new();
    let mut rate = Decimal::ZERO;
    for (region, count) in counts {
        let share = Decimal::from(count) / total;
        rate += share * rates.rate_for(region);
        shares.insert(region, share);
    }

    EffectiveRate {
        rate,
        method: RateMethod::Weighted,
        breakdown: Some(shares),
    }
}

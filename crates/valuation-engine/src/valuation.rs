//! Revenue and valuation calculation, and the engine's single entry point.
//!
//! `monthly revenue = monthly streams x effective rate`, LTM revenue is
//! twelve months of that, and the three valuation bands are fixed multiples
//! of LTM revenue. No currency rounding happens here; display rounding is the
//! formatter's job at the presentation boundary.

use crate::estimator;
use crate::geo_rate;
use catalog_core::{
    DegradedSignal, EstimationMethod, RateMethod, RegionKeywords, Result, ValuationConfig,
    ValuationInputs, ValuationResult,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The catalog valuation engine: model configuration plus the classifier
/// keyword table. Stateless across computations; `compute` is a pure function
/// of its inputs.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: ValuationConfig,
    keywords: RegionKeywords,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self {
            config: ValuationConfig::default(),
            keywords: RegionKeywords::default(),
        }
    }
}

impl ValuationEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            keywords: RegionKeywords::default(),
        })
    }

    /// Build an engine from environment-driven configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(ValuationConfig::from_env()?)
    }

    /// Replace the classifier keyword table.
    pub fn with_keywords(mut self, keywords: RegionKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Run one valuation computation.
    ///
    /// Always produces a result; missing data degrades the estimate through
    /// the documented fallbacks instead of failing. Recomputation with
    /// identical inputs yields an identical result.
    pub fn compute(&self, inputs: &ValuationInputs) -> ValuationResult {
        let estimate = estimator::estimate(inputs, &self.config.decay);
        let rate = geo_rate::effective_rate(
            &inputs.top_cities,
            &self.keywords,
            &self.config.rate_table,
        );

        let monthly_revenue = Decimal::from(estimate.monthly_streams) * rate.rate;
        let ltm_revenue = monthly_revenue * Decimal::from(12);
        let multiples = &self.config.multiples;

        let mut degraded = Vec::new();
        if estimate.method == EstimationMethod::LifetimeRunRateAdjusted {
            degraded.push(DegradedSignal::LifetimeFallback);
        }
        if rate.method == RateMethod::Default {
            degraded.push(DegradedSignal::DefaultRate);
        }

        debug!(
            monthly_streams = estimate.monthly_streams,
            method = %estimate.method,
            rate = %rate.rate,
            rate_method = %rate.method,
            ltm = %ltm_revenue,
            "valuation computed"
        );

        ValuationResult {
            monthly_streams_estimate: estimate.monthly_streams,
            estimation_method: estimate.method,
            months_live: estimate.months_live,
            decay_factor: estimate.decay_factor,
            effective_payout_rate: rate.rate,
            rate_method: rate.method,
            region_share_breakdown: rate.breakdown,
            monthly_revenue,
            ltm_revenue,
            conservative_valuation: ltm_revenue * multiples.conservative,
            market_valuation: ltm_revenue * multiples.market,
            premium_valuation: ltm_revenue * multiples.premium,
            degraded,
        }
    }
}

/// Serializable valuation report, the artifact a caller may hand to whatever
/// persistence or export layer surrounds the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub artist: String,
    pub generated_at: DateTime<Utc>,
    pub inputs: ValuationInputs,
    pub result: ValuationResult,
}

impl ValuationReport {
    pub fn new(artist: impl Into<String>, inputs: ValuationInputs, result: ValuationResult) -> Self {
        Self {
            artist: artist.into(),
            generated_at: Utc::now(),
            inputs,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ValuationMultiples;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_revenue_chain_from_recent_actuals() {
        let engine = ValuationEngine::default();
        let inputs = ValuationInputs::new(0, ymd(2025, 1, 1), ymd(2025, 6, 1))
            .with_recent_30_day(10_000_000)
            .with_top_cities(vec!["London, UK".to_string()]);

        let result = engine.compute(&inputs);
        // 10M streams x 0.0042
        assert_eq!(result.monthly_revenue, Decimal::from(42_000));
        assert_eq!(result.ltm_revenue, Decimal::from(504_000));
        assert_eq!(result.conservative_valuation, Decimal::from(3_024_000));
        assert_eq!(result.market_valuation, Decimal::from(4_032_000));
        assert_eq!(result.premium_valuation, Decimal::from(5_040_000));
        assert!(!result.is_degraded());
    }

    #[test]
    fn test_zero_streams_propagates_cleanly() {
        let engine = ValuationEngine::default();
        let inputs = ValuationInputs::new(0, ymd(2020, 1, 1), ymd(2025, 6, 1));

        let result = engine.compute(&inputs);
        assert_eq!(result.monthly_streams_estimate, 0);
        assert_eq!(result.monthly_revenue, Decimal::ZERO);
        assert_eq!(result.ltm_revenue, Decimal::ZERO);
        assert_eq!(result.conservative_valuation, Decimal::ZERO);
        assert_eq!(result.market_valuation, Decimal::ZERO);
        assert_eq!(result.premium_valuation, Decimal::ZERO);
    }

    #[test]
    fn test_degraded_flags_on_double_fallback() {
        let engine = ValuationEngine::default();
        let inputs = ValuationInputs::new(120_000_000, ymd(2023, 6, 1), ymd(2025, 6, 1));

        let result = engine.compute(&inputs);
        assert!(result.is_degraded());
        assert!(result.degraded.contains(&DegradedSignal::LifetimeFallback));
        assert!(result.degraded.contains(&DegradedSignal::DefaultRate));
        assert_eq!(result.rate_method, RateMethod::Default);
        assert!(result.region_share_breakdown.is_none());
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let engine = ValuationEngine::default();
        let inputs = ValuationInputs::new(120_000_000, ymd(2023, 6, 1), ymd(2025, 6, 1))
            .with_top_cities(vec![
                "London".to_string(),
                "Paris".to_string(),
                "Mumbai".to_string(),
            ]);

        let first = engine.compute(&inputs);
        let second = engine.compute(&inputs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_edited_inputs_change_the_result() {
        let engine = ValuationEngine::default();
        let inputs = ValuationInputs::new(120_000_000, ymd(2023, 6, 1), ymd(2025, 6, 1));
        let before = engine.compute(&inputs);

        let edited = inputs.with_lifetime_streams(240_000_000);
        let after = engine.compute(&edited);
        assert_eq!(
            after.monthly_streams_estimate,
            before.monthly_streams_estimate * 2
        );
    }

    #[test]
    fn test_custom_multiples_flow_through() {
        let config = ValuationConfig {
            multiples: ValuationMultiples {
                conservative: Decimal::from(4),
                market: Decimal::from(5),
                premium: Decimal::from(7),
            },
            ..Default::default()
        };
        let engine = ValuationEngine::new(config).unwrap();
        let inputs = ValuationInputs::new(0, ymd(2025, 1, 1), ymd(2025, 6, 1))
            .with_recent_30_day(1_000_000)
            .with_top_cities(vec!["Tokyo".to_string()]);

        let result = engine.compute(&inputs);
        // 1M x 0.0022 = 2,200 monthly; 26,400 LTM
        assert_eq!(result.ltm_revenue, Decimal::from(26_400));
        assert_eq!(result.conservative_valuation, Decimal::from(105_600));
        assert_eq!(result.premium_valuation, Decimal::from(184_800));
    }

    #[test]
    fn test_custom_keyword_table_drives_geo_weighting() {
        use catalog_core::RegionCode;

        let inputs = ValuationInputs::new(0, ymd(2025, 1, 1), ymd(2025, 6, 1))
            .with_recent_30_day(1_000_000)
            .with_top_cities(vec!["Reykjavik, Iceland".to_string()]);

        // Default table does not know Reykjavik: rest-of-world rate.
        let result = ValuationEngine::default().compute(&inputs);
        assert_eq!(result.effective_payout_rate, Decimal::new(16, 4));

        // An extended table reclassifies the same sample without touching
        // any calculation code.
        let extended = RegionKeywords::new(vec![(
            RegionCode::Asia,
            vec!["reykjavik".to_string()],
        )]);
        let engine = ValuationEngine::default().with_keywords(extended);
        let result = engine.compute(&inputs);
        assert_eq!(result.effective_payout_rate, Decimal::new(22, 4));
        assert_eq!(
            result.region_share_breakdown.unwrap()[&RegionCode::Asia],
            Decimal::ONE
        );
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let engine = ValuationEngine::default();
        let inputs = ValuationInputs::new(80_000, ymd(2024, 1, 1), ymd(2025, 6, 1));
        let result = engine.compute(&inputs);
        let report = ValuationReport::new("Test Artist", inputs, result);

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ValuationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}

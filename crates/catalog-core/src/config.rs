//! Valuation model configuration.
//!
//! The per-stream rate table, the age-decay schedule, and the valuation
//! multiples are business constants asserted by the client specification
//! document, not physical truths. They are therefore carried as configuration
//! with the documented values as defaults, overridable from the environment.

use crate::error::{Error, Result};
use crate::region::RegionCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Per-stream payout rates by listener region, in currency units per stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub us_ca_uk_au: Decimal,
    pub eu_west: Decimal,
    pub latam: Decimal,
    pub asia: Decimal,
    pub rest_of_world: Decimal,
    /// Global average applied when no listener-city data exists at all.
    pub default_rate: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            us_ca_uk_au: Decimal::new(42, 4),   // 0.0042
            eu_west: Decimal::new(36, 4),       // 0.0036
            latam: Decimal::new(18, 4),         // 0.0018
            asia: Decimal::new(22, 4),          // 0.0022
            rest_of_world: Decimal::new(16, 4), // 0.0016
            default_rate: Decimal::new(35, 4),  // 0.0035
        }
    }
}

impl RateTable {
    /// Look up the payout rate for a region. Total, every region has a rate.
    pub fn rate_for(&self, region: RegionCode) -> Decimal {
        match region {
            RegionCode::UsCaUkAu => self.us_ca_uk_au,
            RegionCode::EuWest => self.eu_west,
            RegionCode::Latam => self.latam,
            RegionCode::Asia => self.asia,
            RegionCode::RestOfWorld => self.rest_of_world,
        }
    }
}

/// One range of the catalog-age partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBucket {
    /// Inclusive upper bound in months; `None` marks the open final bucket.
    pub max_months: Option<u32>,
    /// Revenue-decay multiplier, in (0, 1].
    pub factor: Decimal,
}

/// Ordered, exhaustive partition of catalog age into decay buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecaySchedule {
    buckets: Vec<AgeBucket>,
}

impl Default for DecaySchedule {
    fn default() -> Self {
        Self {
            buckets: vec![
                AgeBucket {
                    max_months: Some(3),
                    factor: Decimal::ONE,
                },
                AgeBucket {
                    max_months: Some(12),
                    factor: Decimal::new(85, 2), // 0.85
                },
                AgeBucket {
                    max_months: Some(36),
                    factor: Decimal::new(65, 2), // 0.65
                },
                AgeBucket {
                    max_months: None,
                    factor: Decimal::new(5, 1), // 0.5
                },
            ],
        }
    }
}

impl DecaySchedule {
    pub fn new(buckets: Vec<AgeBucket>) -> Result<Self> {
        let schedule = Self { buckets };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Decay multiplier for a catalog that has been live the given number of
    /// whole months. Exactly one bucket matches any age.
    pub fn factor_for(&self, months_live: u32) -> Decimal {
        for bucket in &self.buckets {
            match bucket.max_months {
                Some(max) if months_live <= max => return bucket.factor,
                Some(_) => continue,
                None => return bucket.factor,
            }
        }
        // Unreachable for a validated schedule; the open bucket catches all.
        Decimal::ONE
    }

    pub fn validate(&self) -> Result<()> {
        if self.buckets.is_empty() {
            return Err(Error::config("decay schedule has no buckets"));
        }
        match self.buckets.last() {
            Some(last) if last.max_months.is_none() => {}
            _ => {
                return Err(Error::config(
                    "decay schedule must end with an open bucket",
                ))
            }
        }

        let mut prev_max: Option<u32> = None;
        for bucket in &self.buckets {
            if bucket.factor <= Decimal::ZERO || bucket.factor > Decimal::ONE {
                return Err(Error::config(format!(
                    "decay factor {} outside (0, 1]",
                    bucket.factor
                )));
            }
            if let Some(max) = bucket.max_months {
                if prev_max.is_some_and(|p| max <= p) {
                    return Err(Error::config(
                        "decay bucket bounds must be strictly increasing",
                    ));
                }
                prev_max = Some(max);
            }
        }
        Ok(())
    }
}

/// Revenue multiples defining the three valuation bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationMultiples {
    pub conservative: Decimal,
    pub market: Decimal,
    pub premium: Decimal,
}

impl Default for ValuationMultiples {
    fn default() -> Self {
        Self {
            conservative: Decimal::from(6),
            market: Decimal::from(8),
            premium: Decimal::from(10),
        }
    }
}

/// Full model configuration consumed by the valuation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    pub rate_table: RateTable,
    pub decay: DecaySchedule,
    pub multiples: ValuationMultiples,
}

impl ValuationConfig {
    /// Load configuration from environment variables, falling back to the
    /// documented defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            rate_table: RateTable {
                us_ca_uk_au: env_decimal(
                    "CATALOG_RATE_US_CA_UK_AU",
                    defaults.rate_table.us_ca_uk_au,
                ),
                eu_west: env_decimal("CATALOG_RATE_EU_WEST", defaults.rate_table.eu_west),
                latam: env_decimal("CATALOG_RATE_LATAM", defaults.rate_table.latam),
                asia: env_decimal("CATALOG_RATE_ASIA", defaults.rate_table.asia),
                rest_of_world: env_decimal(
                    "CATALOG_RATE_ROW",
                    defaults.rate_table.rest_of_world,
                ),
                default_rate: env_decimal(
                    "CATALOG_DEFAULT_RATE",
                    defaults.rate_table.default_rate,
                ),
            },
            decay: defaults.decay,
            multiples: ValuationMultiples {
                conservative: env_decimal(
                    "CATALOG_MULTIPLE_CONSERVATIVE",
                    defaults.multiples.conservative,
                ),
                market: env_decimal("CATALOG_MULTIPLE_MARKET", defaults.multiples.market),
                premium: env_decimal(
                    "CATALOG_MULTIPLE_PREMIUM",
                    defaults.multiples.premium,
                ),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let rates = [
            self.rate_table.us_ca_uk_au,
            self.rate_table.eu_west,
            self.rate_table.latam,
            self.rate_table.asia,
            self.rate_table.rest_of_world,
            self.rate_table.default_rate,
        ];
        if rates.iter().any(|r| r.is_sign_negative()) {
            return Err(Error::config("payout rates must be >= 0"));
        }

        let multiples = [
            self.multiples.conservative,
            self.multiples.market,
            self.multiples.premium,
        ];
        if multiples.iter().any(|m| *m <= Decimal::ZERO) {
            return Err(Error::config("valuation multiples must be > 0"));
        }

        self.decay.validate()
    }
}

fn env_decimal(key: &str, default: Decimal) -> Decimal {
    env::var(key)
        .ok()
        .and_then(|s| Decimal::from_str(&s).ok())
        .unwrap_or(default)
}

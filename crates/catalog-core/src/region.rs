//! City-to-region classification for payout weighting.
//!
//! Listener locations arrive as free-text "City, Country" labels. Classification
//! is a case-insensitive substring match against a fixed per-region keyword
//! table, checked in a fixed order. This is a closed heuristic, not a geocoding
//! service: labels that match no keyword fall into the rest-of-world bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payout regions recognized by the rate model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegionCode {
    /// United States, Canada, United Kingdom, Australia.
    #[serde(rename = "US_CA_UK_AU")]
    UsCaUkAu,
    /// Western Europe.
    #[serde(rename = "EU_WEST")]
    EuWest,
    /// Latin America.
    #[serde(rename = "LATAM")]
    Latam,
    /// Asia.
    #[serde(rename = "ASIA")]
    Asia,
    /// Rest of world, the catch-all and default.
    #[serde(rename = "ROW")]
    RestOfWorld,
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionCode::UsCaUkAu => "US_CA_UK_AU",
            RegionCode::EuWest => "EU_WEST",
            RegionCode::Latam => "LATAM",
            RegionCode::Asia => "ASIA",
            RegionCode::RestOfWorld => "ROW",
        };
        f.write_str(name)
    }
}

/// Per-region keyword table driving [`RegionKeywords::classify`].
///
/// Kept as configuration data so the lists can be extended without touching
/// any calculation logic. A label that could match several regions resolves to
/// the first matching entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionKeywords {
    entries: Vec<(RegionCode, Vec<String>)>,
}

impl Default for RegionKeywords {
    fn default() -> Self {
        let table: &[(RegionCode, &[&str])] = &[
            (
                RegionCode::UsCaUkAu,
                &[
                    "united states",
                    "usa",
                    "canada",
                    "united kingdom",
                    "london",
                    "australia",
                    "new york",
                    "los angeles",
                    "toronto",
                    "sydney",
                ],
            ),
            (
                RegionCode::EuWest,
                &[
                    "germany",
                    "france",
                    "spain",
                    "italy",
                    "netherlands",
                    "berlin",
                    "paris",
                    "madrid",
                ],
            ),
            (
                RegionCode::Latam,
                &[
                    "mexico",
                    "brazil",
                    "argentina",
                    "colombia",
                    "lagos",
                    "santiago",
                ],
            ),
            (
                RegionCode::Asia,
                &[
                    "india", "china", "japan", "korea", "mumbai", "tokyo", "seoul",
                    "bangkok",
                ],
            ),
        ];

        Self {
            entries: table
                .iter()
                .map(|(region, words)| {
                    (*region, words.iter().map(|w| w.to_string()).collect())
                })
                .collect(),
        }
    }
}

impl RegionKeywords {
    /// Build a custom keyword table. Entries are checked in the order given;
    /// keywords are matched lowercase.
    pub fn new(entries: Vec<(RegionCode, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(region, words)| {
                (region, words.into_iter().map(|w| w.to_lowercase()).collect())
            })
            .collect();
        Self { entries }
    }

    /// Classify a free-text city/country label into a payout region.
    ///
    /// Empty or blank labels classify as [`RegionCode::RestOfWorld`].
    pub fn classify(&self, label: &str) -> RegionCode {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return RegionCode::RestOfWorld;
        }

        for (region, keywords) in &self.entries {
            if keywords.iter().any(|kw| label.contains(kw.as_str())) {
                return *region;
            }
        }
        RegionCode::RestOfWorld
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_major_markets() {
        let table = RegionKeywords::default();
        assert_eq!(table.classify("London, United Kingdom"), RegionCode::UsCaUkAu);
        assert_eq!(table.classify("New York, USA"), RegionCode::UsCaUkAu);
        assert_eq!(table.classify("Paris, France"), RegionCode::EuWest);
        assert_eq!(table.classify("Mexico City, Mexico"), RegionCode::Latam);
        assert_eq!(table.classify("Mumbai, India"), RegionCode::Asia);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let table = RegionKeywords::default();
        assert_eq!(table.classify("TOKYO"), RegionCode::Asia);
        assert_eq!(table.classify("berlin"), RegionCode::EuWest);
    }

    #[test]
    fn test_classify_unknown_falls_to_rest_of_world() {
        let table = RegionKeywords::default();
        assert_eq!(table.classify("Reykjavik, Iceland"), RegionCode::RestOfWorld);
        assert_eq!(table.classify(""), RegionCode::RestOfWorld);
        assert_eq!(table.classify("   "), RegionCode::RestOfWorld);
    }

    #[test]
    fn test_classify_order_first_match_wins() {
        // Plausibly matches both US_CA_UK_AU ("london") and EU_WEST lists in a
        // lenient reading; the fixed check order resolves it to the former.
        let table = RegionKeywords::default();
        assert_eq!(table.classify("London, France"), RegionCode::UsCaUkAu);
    }

    #[test]
    fn test_custom_table_replaces_classification() {
        let table = RegionKeywords::new(vec![(
            RegionCode::EuWest,
            vec!["Lisbon".to_string()],
        )]);
        assert_eq!(table.classify("Lisbon, Portugal"), RegionCode::EuWest);
        // The default lists are gone; everything else is rest-of-world.
        assert_eq!(table.classify("London"), RegionCode::RestOfWorld);
    }

    #[test]
    fn test_region_serde_tokens() {
        let json = serde_json::to_string(&RegionCode::UsCaUkAu).unwrap();
        assert_eq!(json, "\"US_CA_UK_AU\"");
        let parsed: RegionCode = serde_json::from_str("\"ROW\"").unwrap();
        assert_eq!(parsed, RegionCode::RestOfWorld);
    }
}

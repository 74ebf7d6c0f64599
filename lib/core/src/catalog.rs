use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Delimiter used for multi-label columns in the catalog tables.
pub const LABEL_DELIMITER: char = ';';

/// Split a delimiter-joined label string into a trimmed, deduplicated,
/// case-preserved set. Empty fragments are dropped.
pub fn split_labels(s: &str) -> BTreeSet<String> {
    s.split(LABEL_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A raw catalog table row, one per store item.
///
/// This is the schema contract at the build boundary. Optional columns
/// absent from an input table deserialize as `None` and get neutral
/// defaults during the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRow {
    pub appid: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    /// Final price in cents, as the store reports it.
    #[serde(default)]
    pub price_final: Option<f32>,
    #[serde(default)]
    pub is_free: Option<bool>,
    #[serde(default)]
    pub required_age: Option<f32>,
    #[serde(default)]
    pub metacritic_score: Option<f32>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

/// A review summary table row, one per appid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    pub appid: u32,
    #[serde(default)]
    pub review_positive: u64,
    #[serde(default)]
    pub review_negative: u64,
    #[serde(default)]
    pub review_total: u64,
    #[serde(default)]
    pub review_ratio: f32,
}

/// A tag summary table row, one per appid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRow {
    pub appid: u32,
    #[serde(default)]
    pub tags: String,
}

/// A cleaned catalog item, produced once per build and immutable for the
/// lifetime of a loaded engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub appid: u32,
    pub name: String,
    /// Parsed from the release-date column; 0 when unparsable.
    pub release_year: i32,
    /// Normalized currency unit; 0.0 for free items.
    pub price: f32,
    pub metacritic_score: f32,
    pub required_age: f32,
    pub is_free: bool,
    pub genres: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub review_positive: u64,
    pub review_negative: u64,
    pub review_total: u64,
    /// Raw positive/total ratio; neutral 0.5 when no reviews exist.
    pub review_ratio: f32,
    /// Bayesian-smoothed ratio in [0, 1].
    pub review_score_adj: f32,
    /// log10(review_total + 1).
    pub review_volume_log: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_labels_trims_and_dedups() {
        let labels = split_labels("Action; Indie ;Action;;  ");
        assert_eq!(labels.len(), 2);
        assert!(labels.contains("Action"));
        assert!(labels.contains("Indie"));
    }

    #[test]
    fn test_split_labels_empty() {
        assert!(split_labels("").is_empty());
        assert!(split_labels(" ; ; ").is_empty());
    }

    #[test]
    fn test_split_labels_preserves_case() {
        let labels = split_labels("RPG;rpg");
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_catalog_row_defaults() {
        let row: CatalogRow = serde_json::from_str(r#"{"appid": 10}"#).unwrap();
        assert_eq!(row.appid, 10);
        assert!(row.name.is_none());
        assert!(row.item_type.is_none());
        assert!(row.price_final.is_none());
    }
}

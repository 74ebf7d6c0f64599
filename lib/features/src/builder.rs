use crate::config::FeatureConfig;
use crate::reviews::{self, ReviewCounts};
use crate::vocab::Vocabulary;
use gamerec_core::{
    split_labels, CatalogItem, CatalogRow, Error, Result, ReviewRow, TagRow, Vector,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

/// Names of the numeric feature columns, in matrix order.
pub const NUMERIC_FEATURES: [&str; 7] = [
    "price",
    "metacritic_score",
    "release_year",
    "required_age",
    "is_free",
    "review_score_adj",
    "review_volume_log",
];

/// Item type retained by the build; everything else (dlc, demos, soundtracks)
/// is dropped.
const GAME_TYPE: &str = "game";

/// The frozen vocabularies for all three multi-label dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vocabularies {
    pub genres: Vocabulary,
    pub tags: Vocabulary,
    pub categories: Vocabulary,
}

/// The persisted output of one feature build: the weighted matrix, the
/// parallel appid order, the parallel column names, and the vocabularies
/// that define the indicator columns.
///
/// Length consistency between rows, appids, and feature names is a hard
/// invariant; [`FeatureBundle::validate`] checks it after any load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureBundle {
    pub rows: Vec<Vector>,
    pub appids: Vec<u32>,
    pub feature_names: Vec<String>,
    pub vocabulary: Vocabularies,
}

impl FeatureBundle {
    /// Feature dimension D, constant across the matrix.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.feature_names.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check the bundle invariants: one appid per row, every row of
    /// dimension D, and D equal to the vocabulary-implied width.
    pub fn validate(&self) -> Result<()> {
        if self.appids.len() != self.rows.len() {
            return Err(Error::SchemaMismatch(format!(
                "bundle has {} rows but {} appids",
                self.rows.len(),
                self.appids.len()
            )));
        }
        let dim = self.dim();
        if let Some(row) = self.rows.iter().find(|r| r.dim() != dim) {
            return Err(Error::SchemaMismatch(format!(
                "row dimension {} does not match {} feature names",
                row.dim(),
                dim
            )));
        }
        let expected = NUMERIC_FEATURES.len()
            + self.vocabulary.genres.len()
            + self.vocabulary.tags.len()
            + self.vocabulary.categories.len();
        if dim != expected {
            return Err(Error::SchemaMismatch(format!(
                "bundle dimension {dim} does not match vocabulary width {expected}"
            )));
        }
        Ok(())
    }
}

/// Everything one batch build produces.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub bundle: FeatureBundle,
    /// Cleaned catalog, row-aligned with the bundle.
    pub catalog: Vec<CatalogItem>,
    /// Rows excluded by the type/name filter or appid deduplication.
    pub dropped_rows: usize,
}

/// Converts the raw catalog, review, and tag tables into a weighted feature
/// matrix plus cleaned catalog metadata.
///
/// The build runs once per catalog snapshot and is fully deterministic:
/// identical inputs and configuration produce an identical matrix, appid
/// order, and vocabulary ordering.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Run the batch build over the three input tables.
    ///
    /// Review and tag tables are optional in spirit: pass empty slices and
    /// every item gets neutral review defaults and row-level tags only.
    pub fn build(
        &self,
        catalog_rows: &[CatalogRow],
        review_rows: &[ReviewRow],
        tag_rows: &[TagRow],
    ) -> Result<BuildOutput> {
        let reviews_by_appid: HashMap<u32, &ReviewRow> =
            review_rows.iter().map(|r| (r.appid, r)).collect();
        let tags_by_appid: HashMap<u32, &TagRow> =
            tag_rows.iter().map(|t| (t.appid, t)).collect();

        let (mut catalog, dropped_rows) = self.clean_catalog(catalog_rows, &tags_by_appid);
        self.merge_reviews(&mut catalog, &reviews_by_appid);

        let vocabulary = Vocabularies {
            genres: Vocabulary::fit(catalog.iter().map(|g| &g.genres), 1),
            tags: Vocabulary::fit(catalog.iter().map(|g| &g.tags), self.config.min_tag_support),
            categories: Vocabulary::fit(catalog.iter().map(|g| &g.categories), 1),
        };

        let numeric = self.numeric_block(&catalog);
        let rows = self.assemble_rows(&catalog, &numeric, &vocabulary);

        let mut feature_names: Vec<String> =
            NUMERIC_FEATURES.iter().map(|n| n.to_string()).collect();
        feature_names.extend(vocabulary.genres.labels().iter().map(|l| format!("genre_{l}")));
        feature_names.extend(vocabulary.tags.labels().iter().map(|l| format!("tag_{l}")));
        feature_names.extend(vocabulary.categories.labels().iter().map(|l| format!("cat_{l}")));

        let bundle = FeatureBundle {
            appids: catalog.iter().map(|g| g.appid).collect(),
            rows,
            feature_names,
            vocabulary,
        };
        bundle.validate()?;

        info!(
            items = catalog.len(),
            dropped = dropped_rows,
            dim = bundle.dim(),
            genres = bundle.vocabulary.genres.len(),
            tags = bundle.vocabulary.tags.len(),
            categories = bundle.vocabulary.categories.len(),
            "feature build complete"
        );

        Ok(BuildOutput {
            bundle,
            catalog,
            dropped_rows,
        })
    }

    /// Filter to named game rows, deduplicate appids, and derive the cleaned
    /// per-item fields. Excluded rows are counted, never fatal.
    fn clean_catalog(
        &self,
        rows: &[CatalogRow],
        tags_by_appid: &HashMap<u32, &TagRow>,
    ) -> (Vec<CatalogItem>, usize) {
        let mut catalog = Vec::with_capacity(rows.len());
        let mut seen: HashSet<u32> = HashSet::with_capacity(rows.len());
        let mut dropped = 0usize;

        for row in rows {
            let is_game = row.item_type.as_deref() == Some(GAME_TYPE);
            let name = row.name.as_deref().map(str::trim).unwrap_or("");
            if !is_game || name.is_empty() || !seen.insert(row.appid) {
                dropped += 1;
                debug!(appid = row.appid, "catalog row excluded from build");
                continue;
            }

            let is_free = row.is_free.unwrap_or(false);
            // Store prices arrive in cents; free items are forced to zero
            // regardless of any leftover price field.
            let price = if is_free {
                0.0
            } else {
                row.price_final.unwrap_or(0.0) / 100.0
            };

            let mut tags: BTreeSet<String> =
                row.tags.as_deref().map(split_labels).unwrap_or_default();
            if let Some(tag_row) = tags_by_appid.get(&row.appid) {
                tags.extend(split_labels(&tag_row.tags));
            }

            catalog.push(CatalogItem {
                appid: row.appid,
                name: name.to_string(),
                release_year: row
                    .release_date
                    .as_deref()
                    .and_then(parse_release_year)
                    .unwrap_or(0),
                price,
                metacritic_score: row.metacritic_score.unwrap_or(0.0),
                required_age: row.required_age.unwrap_or(0.0),
                is_free,
                genres: row.genres.as_deref().map(split_labels).unwrap_or_default(),
                categories: row
                    .categories
                    .as_deref()
                    .map(split_labels)
                    .unwrap_or_default(),
                tags,
                review_positive: 0,
                review_negative: 0,
                review_total: 0,
                review_ratio: reviews::NEUTRAL_RATIO,
                review_score_adj: reviews::NEUTRAL_RATIO,
                review_volume_log: 0.0,
            });
        }

        (catalog, dropped)
    }

    /// Merge the review summary table and apply Bayesian smoothing. Items
    /// absent from the table keep neutral defaults (ratio 0.5, total 0).
    fn merge_reviews(
        &self,
        catalog: &mut [CatalogItem],
        reviews_by_appid: &HashMap<u32, &ReviewRow>,
    ) {
        let counts: Vec<ReviewCounts> = catalog
            .iter()
            .map(|item| {
                reviews_by_appid
                    .get(&item.appid)
                    .map(|r| ReviewCounts {
                        positive: r.review_positive,
                        negative: r.review_negative,
                        total: r.review_total,
                    })
                    .unwrap_or_default()
            })
            .collect();

        let global_mean = reviews::global_mean_ratio(&counts);
        debug!(global_mean, "computed catalog-wide review ratio");

        for (item, c) in catalog.iter_mut().zip(counts) {
            item.review_positive = c.positive;
            item.review_negative = c.negative;
            item.review_total = c.total;
            item.review_ratio = c.raw_ratio();
            item.review_score_adj =
                reviews::smoothed_ratio(c, global_mean, self.config.review_prior_strength);
            item.review_volume_log = reviews::volume_log(c.total);
        }
    }

    /// Build the standardized, weighted numeric block, one inner Vec per
    /// column in [`NUMERIC_FEATURES`] order.
    fn numeric_block(&self, catalog: &[CatalogItem]) -> Vec<Vec<f32>> {
        let columns: Vec<Vec<f32>> = vec![
            catalog.iter().map(|g| g.price).collect(),
            catalog.iter().map(|g| g.metacritic_score).collect(),
            catalog.iter().map(|g| g.release_year as f32).collect(),
            catalog.iter().map(|g| g.required_age).collect(),
            catalog
                .iter()
                .map(|g| if g.is_free { 1.0 } else { 0.0 })
                .collect(),
            catalog.iter().map(|g| g.review_score_adj).collect(),
            catalog.iter().map(|g| g.review_volume_log).collect(),
        ];

        columns
            .into_iter()
            .enumerate()
            .map(|(i, mut column)| {
                standardize(&mut column);
                let boost = match NUMERIC_FEATURES[i] {
                    "review_score_adj" => self.config.review_score_boost,
                    "review_volume_log" => self.config.review_volume_boost,
                    _ => 1.0,
                };
                let weight = self.config.numeric_weight * boost;
                for v in &mut column {
                    *v *= weight;
                }
                column
            })
            .collect()
    }

    /// Concatenate numeric, genre, tag, and category blocks per item, in
    /// that column order.
    fn assemble_rows(
        &self,
        catalog: &[CatalogItem],
        numeric: &[Vec<f32>],
        vocabulary: &Vocabularies,
    ) -> Vec<Vector> {
        let dim = NUMERIC_FEATURES.len()
            + vocabulary.genres.len()
            + vocabulary.tags.len()
            + vocabulary.categories.len();

        catalog
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut row = Vec::with_capacity(dim);
                row.extend(numeric.iter().map(|column| column[i]));
                row.extend(
                    vocabulary
                        .genres
                        .encode(&item.genres)
                        .into_iter()
                        .map(|v| v * self.config.genre_weight),
                );
                row.extend(
                    vocabulary
                        .tags
                        .encode(&item.tags)
                        .into_iter()
                        .map(|v| v * self.config.tag_weight),
                );
                row.extend(
                    vocabulary
                        .categories
                        .encode(&item.categories)
                        .into_iter()
                        .map(|v| v * self.config.category_weight),
                );
                Vector::new(row)
            })
            .collect()
    }
}

/// Standardize a column in place: subtract the population mean, divide by
/// the population standard deviation. Constant columns collapse to zero
/// instead of dividing by zero.
fn standardize(column: &mut [f32]) {
    if column.is_empty() {
        return;
    }
    let n = column.len() as f64;
    let mean = column.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = column
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let std = variance.sqrt();

    if std > f64::EPSILON {
        for v in column.iter_mut() {
            *v = ((f64::from(*v) - mean) / std) as f32;
        }
    } else {
        column.fill(0.0);
    }
}

/// Extract a plausible release year from free-form release-date text.
/// Store dates come in several shapes ("12 Nov 2019", "2019-11-12",
/// "Coming soon"); the first four-digit token in a sane range wins.
fn parse_release_year(date: &str) -> Option<i32> {
    let bytes = date.as_bytes();
    let mut start = 0usize;
    while start < bytes.len() {
        if bytes[start].is_ascii_digit() {
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end - start == 4 {
                if let Ok(year) = date[start..end].parse::<i32>() {
                    if (1950..=2100).contains(&year) {
                        return Some(year);
                    }
                }
            }
            start = end;
        } else {
            start += 1;
        }
    }
    None
}

use gamerec_core::{CatalogItem, Error, Result};
use serde::{Deserialize, Serialize};

/// Re-rank weights combining vector similarity with review-quality signals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Weight on cosine similarity to the query vector.
    pub similarity_weight: f32,
    /// Weight on the normalized smoothed review score.
    pub review_weight: f32,
    /// Weight on the normalized log review volume.
    pub volume_weight: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 3.0,
            review_weight: 0.8,
            volume_weight: 0.9,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("similarity_weight", self.similarity_weight),
            ("review_weight", self.review_weight),
            ("volume_weight", self.volume_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Linear min-max scaling of `value` into [0, 1]. Returns `default` for a
/// degenerate range (`max <= min`) instead of dividing by zero.
#[inline]
pub fn normalize(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if max <= min {
        return default;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Computes the overall re-rank score for a candidate.
///
/// The normalization bounds are computed once over the entire loaded catalog
/// at construction time, not per query.
#[derive(Debug, Clone)]
pub struct ReviewScorer {
    config: ScoringConfig,
    score_min: f32,
    score_max: f32,
    volume_min: f32,
    volume_max: f32,
}

impl ReviewScorer {
    pub fn new(config: ScoringConfig, catalog: &[CatalogItem]) -> Result<Self> {
        config.validate()?;

        let mut score_min = f32::INFINITY;
        let mut score_max = f32::NEG_INFINITY;
        let mut volume_min = f32::INFINITY;
        let mut volume_max = f32::NEG_INFINITY;
        for item in catalog {
            score_min = score_min.min(item.review_score_adj);
            score_max = score_max.max(item.review_score_adj);
            volume_min = volume_min.min(item.review_volume_log);
            volume_max = volume_max.max(item.review_volume_log);
        }

        Ok(Self {
            config,
            score_min,
            score_max,
            volume_min,
            volume_max,
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weighted sum of similarity and the two normalized review signals.
    /// Degenerate review columns fall back to a neutral 0.5 score and a 0.0
    /// volume contribution.
    #[inline]
    pub fn overall_score(
        &self,
        similarity: f32,
        review_score_adj: f32,
        review_volume_log: f32,
    ) -> f32 {
        self.config.similarity_weight * similarity
            + self.config.review_weight
                * normalize(review_score_adj, self.score_min, self.score_max, 0.5)
            + self.config.volume_weight
                * normalize(review_volume_log, self.volume_min, self.volume_max, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn item(appid: u32, score_adj: f32, volume_log: f32) -> CatalogItem {
        CatalogItem {
            appid,
            name: format!("game {appid}"),
            release_year: 2020,
            price: 9.99,
            metacritic_score: 0.0,
            required_age: 0.0,
            is_free: false,
            genres: BTreeSet::new(),
            categories: BTreeSet::new(),
            tags: BTreeSet::new(),
            review_positive: 0,
            review_negative: 0,
            review_total: 0,
            review_ratio: 0.5,
            review_score_adj: score_adj,
            review_volume_log: volume_log,
        }
    }

    #[test]
    fn test_normalize_endpoints() {
        assert_eq!(normalize(0.0, 0.0, 10.0, 0.5), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0, 0.5), 1.0);
        assert_eq!(normalize(5.0, 0.0, 10.0, 0.5), 0.5);
    }

    #[test]
    fn test_normalize_degenerate_range() {
        assert_eq!(normalize(3.0, 1.0, 1.0, 0.5), 0.5);
        assert_eq!(normalize(3.0, 2.0, 1.0, 0.25), 0.25);
    }

    #[test]
    fn test_overall_score_weights() {
        let catalog = vec![item(1, 0.0, 0.0), item(2, 1.0, 4.0)];
        let scorer = ReviewScorer::new(ScoringConfig::default(), &catalog).unwrap();

        // Max review signals: 3.0*sim + 0.8*1.0 + 0.9*1.0
        let score = scorer.overall_score(1.0, 1.0, 4.0);
        assert!((score - 4.7).abs() < 1e-5);

        // Min review signals contribute nothing.
        let score = scorer.overall_score(1.0, 0.0, 0.0);
        assert!((score - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_constant_catalog_uses_defaults() {
        let catalog = vec![item(1, 0.5, 2.0), item(2, 0.5, 2.0)];
        let scorer = ReviewScorer::new(ScoringConfig::default(), &catalog).unwrap();

        // Both review columns are constant: score falls back to
        // 3.0*sim + 0.8*0.5 + 0.9*0.0.
        let score = scorer.overall_score(0.5, 0.5, 2.0);
        assert!((score - (1.5 + 0.4)).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScoringConfig {
            similarity_weight: f32::NAN,
            ..ScoringConfig::default()
        };
        assert!(ReviewScorer::new(config, &[]).is_err());
    }
}

use gamerec_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunable weights and thresholds for the feature build.
///
/// Every block multiplier is applied after standardization/encoding, so the
/// defaults express relative importance directly: tags dominate (the finest
/// grained taste signal), genres and categories sit above the numeric block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureConfig {
    /// Base multiplier for the standardized numeric block.
    pub numeric_weight: f32,
    /// Multiplier for genre indicator columns.
    pub genre_weight: f32,
    /// Multiplier for tag indicator columns.
    pub tag_weight: f32,
    /// Multiplier for category indicator columns.
    pub category_weight: f32,
    /// Extra boost on the smoothed review score column, on top of
    /// `numeric_weight`.
    pub review_score_boost: f32,
    /// Extra boost on the log review volume column, on top of
    /// `numeric_weight`.
    pub review_volume_boost: f32,
    /// Tags carried by fewer items than this are dropped before encoding.
    pub min_tag_support: usize,
    /// Prior strength `m` for Bayesian review-ratio smoothing: an item needs
    /// this many reviews before its own ratio and the global mean weigh
    /// equally.
    pub review_prior_strength: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            numeric_weight: 1.0,
            genre_weight: 1.2,
            tag_weight: 4.0,
            category_weight: 1.5,
            review_score_boost: 2.0,
            review_volume_boost: 1.5,
            min_tag_support: 10,
            review_prior_strength: 500.0,
        }
    }
}

impl FeatureConfig {
    /// Validate the configuration: all weights must be finite and
    /// non-negative, the prior strength strictly positive.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("numeric_weight", self.numeric_weight),
            ("genre_weight", self.genre_weight),
            ("tag_weight", self.tag_weight),
            ("category_weight", self.category_weight),
            ("review_score_boost", self.review_score_boost),
            ("review_volume_boost", self.review_volume_boost),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.review_prior_strength.is_finite() || self.review_prior_strength <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "review_prior_strength must be positive, got {}",
                self.review_prior_strength
            )));
        }
        Ok(())
    }
}

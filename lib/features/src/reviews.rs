//! Bayesian smoothing of review ratios.
//!
//! An item's raw positive ratio is unreliable at low review counts, so the
//! estimate is shrunk toward the catalog-wide mean ratio in proportion to
//! how little evidence the item has.

/// Neutral ratio used when an item (or the whole catalog) has no reviews.
pub const NEUTRAL_RATIO: f32 = 0.5;

/// Per-item review counts after merging the review summary table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewCounts {
    pub positive: u64,
    pub negative: u64,
    pub total: u64,
}

impl ReviewCounts {
    /// Raw positive/total ratio; neutral when there are no reviews.
    #[inline]
    #[must_use]
    pub fn raw_ratio(&self) -> f32 {
        if self.total > 0 {
            self.positive as f32 / self.total as f32
        } else {
            NEUTRAL_RATIO
        }
    }
}

/// Catalog-wide mean positive ratio over items that have any reviews:
/// sum(positive) / sum(total). Falls back to the neutral ratio when no item
/// has reviews.
pub fn global_mean_ratio(counts: &[ReviewCounts]) -> f32 {
    let mut positive = 0u64;
    let mut total = 0u64;
    for c in counts {
        if c.total > 0 {
            positive += c.positive;
            total += c.total;
        }
    }
    if total > 0 {
        positive as f32 / total as f32
    } else {
        NEUTRAL_RATIO
    }
}

/// Smoothed ratio: `(n/(n+m))*raw + (m/(n+m))*global` with evidence
/// `n = total` and prior strength `m`. With no reviews this is exactly the
/// global mean; with overwhelming evidence it converges to the raw ratio.
pub fn smoothed_ratio(counts: ReviewCounts, global_mean: f32, prior_strength: f32) -> f32 {
    let n = counts.total as f32;
    let m = prior_strength;
    (n / (n + m)) * counts.raw_ratio() + (m / (n + m)) * global_mean
}

/// Log-scaled popularity: log10(total + 1).
#[inline]
#[must_use]
pub fn volume_log(total: u64) -> f32 {
    ((total + 1) as f64).log10() as f32
}

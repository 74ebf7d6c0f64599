//! # gamerec Engine
//!
//! The query side of the gamerec recommender.
//!
//! A [`Recommender`] wraps one frozen build snapshot (feature matrix, k-NN
//! index, cleaned catalog, scoring bounds) and answers two pure read
//! queries:
//!
//! - [`Recommender::recommend_similar`] - neighbors of one reference item
//! - [`Recommender::recommend_for_liked`] - neighbors of a taste vector
//!   averaged over a liked-item set
//!
//! Both retrieve a candidate pool by cosine distance, drop candidates that
//! share no genre with the reference, re-rank by a weighted blend of
//! similarity and review quality ([`ReviewScorer`]), and truncate.
//!
//! Queries are lock-free: each one clones the current snapshot `Arc`.
//! Rebuilds install a whole new snapshot atomically via
//! [`Recommender::swap`].

pub mod filter;
pub mod recommend;
pub mod scorer;

pub use recommend::{EngineConfig, Recommendation, Recommender};
pub use scorer::{normalize, ReviewScorer, ScoringConfig};

//! # gamerec Features
//!
//! The feature-weighting pipeline for the gamerec recommender.
//!
//! Turns the raw catalog, review-summary, and tag tables into a single
//! comparable vector space:
//!
//! - [`FeatureBuilder`] - batch build of the weighted feature matrix
//! - [`FeatureConfig`] - every tunable weight and threshold, in one place
//! - [`Vocabulary`] - frozen per-dimension label vocabularies
//! - [`reviews`] - Bayesian smoothing of review ratios
//!
//! The build is deterministic: identical inputs and configuration always
//! produce an identical matrix, appid order, and vocabulary ordering.
//!
//! ## Example
//!
//! ```rust
//! use gamerec_features::{FeatureBuilder, FeatureConfig};
//! use gamerec_core::CatalogRow;
//!
//! let rows = vec![CatalogRow {
//!     appid: 620,
//!     name: Some("Portal 2".to_string()),
//!     item_type: Some("game".to_string()),
//!     release_date: Some("18 Apr 2011".to_string()),
//!     price_final: Some(999.0),
//!     is_free: Some(false),
//!     required_age: None,
//!     metacritic_score: Some(95.0),
//!     genres: Some("Puzzle;Action".to_string()),
//!     categories: Some("Single-player".to_string()),
//!     tags: None,
//! }];
//!
//! let builder = FeatureBuilder::new(FeatureConfig::default()).unwrap();
//! let output = builder.build(&rows, &[], &[]).unwrap();
//! assert_eq!(output.bundle.len(), 1);
//! ```

pub mod builder;
pub mod config;
pub mod reviews;
pub mod vocab;

pub use builder::{BuildOutput, FeatureBuilder, FeatureBundle, Vocabularies, NUMERIC_FEATURES};
pub use config::FeatureConfig;
pub use vocab::Vocabulary;

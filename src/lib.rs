//! # gamerec
//!
//! A content-based game recommender: a weighted feature pipeline over
//! catalog, review, and tag tables, with exact cosine retrieval and
//! review-quality re-ranking.
//!
//! ## Quick Start
//!
//! ```rust
//! use gamerec::prelude::*;
//!
//! // One catalog row; in production these come from the persisted tables.
//! let rows = vec![CatalogRow {
//!     appid: 620,
//!     name: Some("Portal 2".to_string()),
//!     item_type: Some("game".to_string()),
//!     release_date: Some("18 Apr 2011".to_string()),
//!     price_final: Some(999.0),
//!     is_free: Some(false),
//!     required_age: None,
//!     metacritic_score: Some(95.0),
//!     genres: Some("Puzzle".to_string()),
//!     categories: Some("Single-player".to_string()),
//!     tags: None,
//! }];
//!
//! // Batch build: raw tables -> weighted feature matrix + cleaned catalog.
//! let builder = FeatureBuilder::new(FeatureConfig::default()).unwrap();
//! let output = builder.build(&rows, &[], &[]).unwrap();
//!
//! // Load the build into a read-only engine and query it.
//! let engine = Recommender::new(
//!     EngineConfig::default(),
//!     output.bundle,
//!     output.catalog,
//! ).unwrap();
//! let similar = engine.recommend_similar(620, 10, true).unwrap();
//! assert!(similar.is_empty()); // one-item catalog, nothing else to return
//! ```
//!
//! ## Crate Structure
//!
//! gamerec is composed of several crates:
//!
//! - [`gamerec-core`](gamerec_core) - vectors, catalog model, exact k-NN index
//! - [`gamerec-features`](gamerec_features) - the feature-weighting pipeline
//! - [`gamerec-engine`](gamerec_engine) - genre filtering, scoring, querying
//! - [`gamerec-storage`](gamerec_storage) - table loading and bundle persistence
//!
//! ## Design
//!
//! - **Exact retrieval**: brute-force cosine k-NN, sized for catalogs that
//!   fit in memory
//! - **Weighted feature space**: standardized numerics plus genre, tag, and
//!   category indicator blocks with per-block multipliers
//! - **Bayesian-smoothed reviews**: low-evidence items shrink toward the
//!   catalog mean ratio
//! - **Lock-free reads**: queries run on a frozen snapshot; rebuilds swap in
//!   a complete replacement atomically

// Re-export core types
pub use gamerec_core::{
    split_labels, CatalogItem, CatalogRow, Error, KnnIndex, Result, ReviewRow, TagRow, Vector,
    LABEL_DELIMITER,
};

// Re-export the feature pipeline
pub use gamerec_features::{
    BuildOutput, FeatureBuilder, FeatureBundle, FeatureConfig, Vocabulary, NUMERIC_FEATURES,
};

// Re-export the query engine
pub use gamerec_engine::{EngineConfig, Recommendation, Recommender, ReviewScorer, ScoringConfig};

// Re-export storage
pub use gamerec_storage::{load_bundle, load_catalog, load_reviews, load_tags, save_bundle};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuildOutput, CatalogItem, CatalogRow, EngineConfig, Error, FeatureBuilder, FeatureBundle,
        FeatureConfig, KnnIndex, Recommendation, Recommender, Result, ReviewRow, ReviewScorer,
        ScoringConfig, TagRow, Vector, Vocabulary,
    };
}

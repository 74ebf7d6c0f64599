//! # gamerec Storage
//!
//! Storage layer for the gamerec recommender: reads the catalog, review,
//! and tag input tables (JSON Lines, schema-contracted row structs) and
//! persists the built feature bundle with bincode and an atomic
//! temp-file-then-rename write.

pub mod bundle;
pub mod tables;

pub use bundle::{load_bundle, save_bundle, StoredBundle};
pub use tables::{load_catalog, load_reviews, load_tags};

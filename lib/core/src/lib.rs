//! # gamerec Core
//!
//! Core library for the gamerec content-based recommender.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Vector`] - Dense vector representation with cosine operations
//! - [`CatalogItem`] - A cleaned catalog item with review-derived fields
//! - [`KnnIndex`] - Exact brute-force nearest-neighbor index
//!
//! ## Example
//!
//! ```rust
//! use gamerec_core::{KnnIndex, Vector};
//!
//! let index = KnnIndex::build(vec![
//!     Vector::new(vec![1.0, 0.0]),
//!     Vector::new(vec![0.0, 1.0]),
//! ]).unwrap();
//!
//! let neighbors = index.query(&Vector::new(vec![1.0, 0.0]), 2).unwrap();
//! assert_eq!(neighbors[0].0, 0);
//! ```

pub mod catalog;
pub mod error;
pub mod knn;
pub mod vector;

pub use catalog::{split_labels, CatalogItem, CatalogRow, ReviewRow, TagRow, LABEL_DELIMITER};
pub use error::{Error, Result};
pub use knn::KnnIndex;
pub use vector::Vector;

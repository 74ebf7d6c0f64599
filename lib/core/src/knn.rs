use crate::{Error, Result, Vector};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Exact brute-force nearest-neighbor index over a frozen feature matrix.
///
/// Distances are cosine distances (1 - cosine similarity) in [0, 2].
/// The matrix is small enough for exact comparison against every row, so
/// there is no graph or quantization; an approximate backend could replace
/// this behind the same contract without changing callers.
#[derive(Debug, Clone)]
pub struct KnnIndex {
    rows: Vec<Vector>,
    dim: usize,
}

impl KnnIndex {
    /// Build an index over the given rows. All rows must share one dimension.
    pub fn build(rows: Vec<Vector>) -> Result<Self> {
        let dim = rows.first().map(Vector::dim).unwrap_or(0);
        for row in &rows {
            if row.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: row.dim(),
                });
            }
        }
        Ok(Self { rows, dim })
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

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Vector> {
        self.rows.get(index)
    }

    /// Return the `k` nearest rows to `query`, ascending by cosine distance.
    ///
    /// Ties in distance keep row order for determinism. Returns fewer than
    /// `k` entries when the index holds fewer rows.
    pub fn query(&self, query: &Vector, k: usize) -> Result<Vec<(usize, f32)>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .rows
            .par_iter()
            .enumerate()
            .map(|(i, row)| (i, query.cosine_distance(row)))
            .collect();

        scored.sort_unstable_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

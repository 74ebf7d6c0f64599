use serde::{Deserialize, Serialize};

/// A vector of floating point numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    #[inline]
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Compute cosine similarity with another vector.
    /// Mismatched dimensions and zero-norm vectors yield 0.0.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Cosine distance in [0, 2]: 1 - cosine similarity.
    #[inline]
    pub fn cosine_distance(&self, other: &Vector) -> f32 {
        1.0 - self.cosine_similarity(other)
    }

    /// Arithmetic mean of a set of rows. Returns `None` for an empty set
    /// or mismatched dimensions.
    pub fn mean<'a, I>(rows: I) -> Option<Vector>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut iter = rows.into_iter();
        let first = iter.next()?;
        let mut acc: Vec<f64> = first.data.iter().map(|&x| f64::from(x)).collect();
        let mut count = 1usize;

        for row in iter {
            if row.dim() != acc.len() {
                return None;
            }
            for (a, &x) in acc.iter_mut().zip(row.data.iter()) {
                *a += f64::from(x);
            }
            count += 1;
        }

        let n = count as f64;
        Some(Vector::new(acc.into_iter().map(|a| (a / n) as f32).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_range() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![-1.0, 0.0]);
        assert!((v1.cosine_distance(&v2) - 2.0).abs() < 1e-6);
        assert!((v1.cosine_distance(&v1) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_similarity() {
        let zero = Vector::new(vec![0.0, 0.0]);
        let v = Vector::new(vec![1.0, 2.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
    }

    #[test]
    fn test_mean() {
        let a = Vector::new(vec![1.0, 2.0]);
        let b = Vector::new(vec![3.0, 4.0]);
        let m = Vector::mean([&a, &b]).unwrap();
        assert_eq!(m.as_slice(), &[2.0, 3.0]);
    }

    #[test]
    fn test_mean_empty() {
        let rows: Vec<&Vector> = Vec::new();
        assert!(Vector::mean(rows).is_none());
    }
}

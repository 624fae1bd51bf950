//! Core value types for recognition scoring.

use std::collections::BTreeMap;

use crate::domain::model::FoodItem;

/// Sparse bag-of-words vector keyed by token.
///
/// Either the vector is empty (the source text had no tokens) or the sum of
/// squared weights is 1.0 within floating-point tolerance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextVector {
    weights: BTreeMap<String, f64>,
}

impl TextVector {
    /// Build a unit-length vector from raw token counts.
    ///
    /// A zero norm (no tokens) leaves the weights unscaled instead of
    /// dividing by zero.
    pub fn from_counts(counts: BTreeMap<String, u32>) -> Self {
        let norm = counts
            .values()
            .map(|&count| f64::from(count) * f64::from(count))
            .sum::<f64>()
            .sqrt();
        let divisor = if norm == 0.0 { 1.0 } else { norm };
        let weights = counts
            .into_iter()
            .map(|(token, count)| (token, f64::from(count) / divisor))
            .collect();
        Self { weights }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight for a token, 0.0 when absent.
    pub fn weight(&self, token: &str) -> f64 {
        self.weights.get(token).copied().unwrap_or(0.0)
    }

    /// Sparse dot product over tokens present in both vectors.
    ///
    /// Both inputs are unit length, so this is their cosine similarity.
    pub fn dot(&self, other: &TextVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .map(|(token, weight)| weight * large.weight(token))
            .sum()
    }

    /// Euclidean norm of the weights.
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|weight| weight * weight).sum::<f64>().sqrt()
    }
}

/// A catalog item paired with the confidence of a match.
///
/// Borrows the engine's owned copy of the item rather than duplicating it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition<'a> {
    pub item: &'a FoodItem,
    pub confidence: f64,
}

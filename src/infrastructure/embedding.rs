//! Bag-of-words text embedding.
//!
//! A deliberately small embedding that works offline: tokenize, count term
//! frequencies within the single text, and L2-normalize. No corpus
//! statistics are kept, so encoding is a pure function of the input string.

use crate::domain::ports::TextEmbedder;
use crate::domain::types::TextVector;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct BagOfWordsEmbedder;

impl BagOfWordsEmbedder {
    pub fn new() -> Self {
        Self
    }
}

impl TextEmbedder for BagOfWordsEmbedder {
    fn encode(&self, texts: &[String]) -> Vec<TextVector> {
        texts.iter().map(|text| encode_one(text)).collect()
    }
}

fn encode_one(text: &str) -> TextVector {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    TextVector::from_counts(counts)
}

/// Tokenize text for embedding
/// - Lowercase the whole string first
/// - Keep maximal runs of word characters and apostrophes
/// - Everything else separates tokens and is discarded
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\''))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Banana, Ripe!");
        assert_eq!(tokens, vec!["banana", "ripe"]);
    }

    #[test]
    fn test_tokenize_keeps_apostrophes_and_digits() {
        let tokens = tokenize("Trader's mix: 2 scoops (raw_oats)");
        assert_eq!(tokens, vec!["trader's", "mix", "2", "scoops", "raw_oats"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ...!!  ").is_empty());
    }

    #[test]
    fn test_encode_is_unit_length() {
        let embedder = BagOfWordsEmbedder::new();
        let vectors = embedder.encode(&["banana banana ripe".to_string()]);
        assert_eq!(vectors.len(), 1);
        assert!((vectors[0].norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_encode_counts_term_frequency() {
        let embedder = BagOfWordsEmbedder::new();
        let vectors = embedder.encode(&["banana banana ripe".to_string()]);
        let vector = &vectors[0];
        // 2 occurrences of "banana" against 1 of "ripe"
        assert!((vector.weight("banana") / vector.weight("ripe") - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_encode_empty_text_yields_empty_vector() {
        let embedder = BagOfWordsEmbedder::new();
        let vectors = embedder.encode(&["".to_string()]);
        assert!(vectors[0].is_empty());
    }

    #[test]
    fn test_encode_preserves_input_order() {
        let embedder = BagOfWordsEmbedder::new();
        let vectors = embedder.encode(&["banana".to_string(), "apple".to_string()]);
        assert!(vectors[0].weight("banana") > 0.0);
        assert!(vectors[1].weight("apple") > 0.0);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let embedder = BagOfWordsEmbedder::new();
        let text = vec!["grilled chicken breast with rice".to_string()];
        assert_eq!(embedder.encode(&text), embedder.encode(&text));
    }

    #[test]
    fn test_self_similarity_is_one() {
        let embedder = BagOfWordsEmbedder::new();
        let text = vec!["peanut butter on toast".to_string()];
        let a = &embedder.encode(&text)[0];
        let b = &embedder.encode(&text)[0];
        assert!((a.dot(b) - 1.0).abs() < 1e-9);
    }
}

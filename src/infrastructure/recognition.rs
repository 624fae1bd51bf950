//! Food recognition over an in-memory reference catalog.
//!
//! The engine scores a free-text description against every catalog item by
//! cosine similarity of bag-of-words vectors, applies a lexical alias
//! override, and returns the top results. The catalog is append-only and
//! scanned in full per query, which is fine at tens to low hundreds of
//! items.

use crate::application::error::AppError;
use crate::domain::model::{FoodItem, FoodRecord};
use crate::domain::ports::{ReferenceStore, TextEmbedder};
use crate::domain::types::{Recognition, TextVector};
use std::io;
use tracing::{debug, info};

/// Confidence floor applied when a description lexically matches an item's
/// name or alias list.
const ALIAS_CONFIDENCE_FLOOR: f64 = 0.99;

/// Default number of results per description.
pub const DEFAULT_TOP_K: usize = 3;

/// A catalog item together with its precomputed embedding.
///
/// Item and vector travel as one value, so the catalog cannot hold an item
/// without its vector.
#[derive(Debug, Clone)]
struct CatalogEntry {
    item: FoodItem,
    vector: TextVector,
}

/// Recognises food items from free-text descriptions.
pub struct RecognitionEngine {
    embedder: Box<dyn TextEmbedder>,
    catalog: Vec<CatalogEntry>,
    default_top_k: usize,
}

impl RecognitionEngine {
    /// Build an engine from a reference dataset source.
    ///
    /// A missing source is fatal: it maps to
    /// [`AppError::MissingReferenceData`] and is not retried.
    pub fn load(
        reference: &dyn ReferenceStore,
        embedder: Box<dyn TextEmbedder>,
    ) -> Result<Self, AppError> {
        let records = reference.load().map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => {
                AppError::MissingReferenceData(reference.path().display().to_string())
            }
            io::ErrorKind::InvalidData => AppError::InvalidRecord(err.to_string()),
            _ => AppError::Io(err.to_string()),
        })?;
        let engine = Self::from_records(records, embedder)?;
        info!(
            items = engine.catalog.len(),
            path = %reference.path().display(),
            "reference catalog loaded"
        );
        Ok(engine)
    }

    /// Build an engine from already-deserialized reference records.
    pub fn from_records(
        records: Vec<FoodRecord>,
        embedder: Box<dyn TextEmbedder>,
    ) -> Result<Self, AppError> {
        let mut engine = Self {
            embedder,
            catalog: Vec::with_capacity(records.len()),
            default_top_k: DEFAULT_TOP_K,
        };
        for record in records {
            if record.name.trim().is_empty() {
                return Err(AppError::InvalidRecord(
                    "reference record is missing a name".to_string(),
                ));
            }
            engine.push_item(FoodItem::from(record));
        }
        Ok(engine)
    }

    /// Override the default number of results used by [`scan_bulk`].
    ///
    /// [`scan_bulk`]: RecognitionEngine::scan_bulk
    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Cloned snapshot of the catalog items; mutating it does not touch
    /// engine state.
    pub fn known_items(&self) -> Vec<FoodItem> {
        self.catalog.iter().map(|entry| entry.item.clone()).collect()
    }

    /// Score a description against the whole catalog and return the top
    /// `top_k` results, best first.
    ///
    /// Empty or whitespace-only descriptions and `top_k == 0` return an
    /// empty vector without scoring. Ties keep catalog order.
    pub fn recognise(&self, description: &str, top_k: usize) -> Vec<Recognition<'_>> {
        if description.trim().is_empty() || top_k == 0 {
            return Vec::new();
        }

        let query = self.embed_single(description);
        let mut results: Vec<Recognition<'_>> = self
            .catalog
            .iter()
            .map(|entry| {
                let cosine = query.dot(&entry.vector);
                let confidence = if entry.item.matches(description) {
                    cosine.max(ALIAS_CONFIDENCE_FLOOR)
                } else {
                    cosine
                };
                Recognition {
                    item: &entry.item,
                    confidence,
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    /// Append an item and its vector to the catalog in one call. The item
    /// is searchable from the next [`recognise`] call onward.
    ///
    /// [`recognise`]: RecognitionEngine::recognise
    pub fn add_custom_item(&mut self, item: FoodItem) {
        debug!(name = %item.name, "catalog item added");
        self.push_item(item);
    }

    /// Apply [`recognise`] independently to each description with the
    /// default `top_k`, preserving input order.
    ///
    /// [`recognise`]: RecognitionEngine::recognise
    pub fn scan_bulk(&self, descriptions: &[String]) -> Vec<Vec<Recognition<'_>>> {
        descriptions
            .iter()
            .map(|description| self.recognise(description, self.default_top_k))
            .collect()
    }

    fn push_item(&mut self, item: FoodItem) {
        let vector = self.embed_single(&item_representation(&item));
        self.catalog.push(CatalogEntry { item, vector });
    }

    fn embed_single(&self, text: &str) -> TextVector {
        self.embedder
            .encode(&[text.to_string()])
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

/// Textual form of an item used for embedding: name, serving size, aliases,
/// and `nutrient:amount` pairs joined into one string.
fn item_representation(item: &FoodItem) -> String {
    let aliases = item.aliases.join(", ");
    let macros = item
        .macronutrients
        .iter()
        .map(|(nutrient, amount)| format!("{}:{}", nutrient, amount))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} serving {} {} {}",
        item.name, item.serving_size, aliases, macros
    )
}

use crate::domain::model::{FoodEntry, FoodRecord};
use crate::domain::types::TextVector;
use std::io;
use std::path::Path;

/// Turns free text into unit-length sparse vectors.
///
/// Implementations must be deterministic: encoding is a pure function of the
/// input texts, one output per input, order-preserving. The recognition
/// engine depends only on this trait, so a heavier model can replace the
/// bag-of-words embedder without touching the engine.
pub trait TextEmbedder: Send + Sync {
    fn encode(&self, texts: &[String]) -> Vec<TextVector>;
}

/// Trait for persisting the food log
pub trait EntryStore: Send + Sync {
    /// Load all persisted entries. A store with no data yet loads empty.
    fn load(&self) -> io::Result<Vec<FoodEntry>>;
    /// Persist the full entry list, replacing any previous contents.
    fn save_all(&self, entries: &[FoodEntry]) -> io::Result<()>;
    /// Get the storage path
    fn path(&self) -> &Path;
}

/// Trait for loading the reference food dataset
pub trait ReferenceStore: Send + Sync {
    /// Load the reference records. A missing source surfaces as
    /// `io::ErrorKind::NotFound`, malformed data as
    /// `io::ErrorKind::InvalidData`.
    fn load(&self) -> io::Result<Vec<FoodRecord>>;
    /// Get the source path
    fn path(&self) -> &Path;
}

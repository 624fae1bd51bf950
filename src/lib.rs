pub mod application;
pub mod domain;
pub mod infrastructure;

pub use crate::application::config::AppConfig;
pub use crate::application::error::AppError;
pub use crate::application::tracker::{FoodTracker, ManualFood};
pub use crate::domain::model::{DailyLog, FoodEntry, FoodItem, FoodRecord};
pub use crate::domain::types::{Recognition, TextVector};
pub use crate::infrastructure::embedding::BagOfWordsEmbedder;
pub use crate::infrastructure::recognition::RecognitionEngine;
pub use crate::infrastructure::storage::{JsonReferenceStore, JsonlEntryStore};

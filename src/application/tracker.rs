//! High-level coordination of recognition, logging, and reporting.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::application::error::AppError;
use crate::domain::model::{
    group_entries_by_day, sum_macronutrients, DailyLog, FoodEntry, FoodItem,
};
use crate::domain::ports::EntryStore;
use crate::domain::types::Recognition;
use crate::infrastructure::recognition::RecognitionEngine;

/// Fields for logging a food that is not in the catalog.
#[derive(Debug, Clone)]
pub struct ManualFood {
    pub name: String,
    pub serving_size: String,
    pub calories: f64,
    pub macronutrients: BTreeMap<String, f64>,
}

/// Coordinates food recognition, logging, and reporting.
pub struct FoodTracker {
    engine: RecognitionEngine,
    entry_store: Box<dyn EntryStore>,
    entries: Vec<FoodEntry>,
}

impl FoodTracker {
    /// Build a tracker, restoring previously persisted entries.
    pub fn load(
        engine: RecognitionEngine,
        entry_store: Box<dyn EntryStore>,
    ) -> Result<Self, AppError> {
        let entries = entry_store.load()?;
        info!(entries = entries.len(), "food log loaded");
        Ok(Self {
            engine,
            entry_store,
            entries,
        })
    }

    /// The underlying recognition engine.
    pub fn engine(&self) -> &RecognitionEngine {
        &self.engine
    }

    /// Recognise catalog items matching a free-text description.
    pub fn scan_description(&self, description: &str, top_k: usize) -> Vec<Recognition<'_>> {
        self.engine.recognise(description, top_k)
    }

    /// Register a food so future scans can recognise it.
    pub fn register_custom_food(&mut self, item: FoodItem) {
        debug!(name = %item.name, "custom food registered");
        self.engine.add_custom_item(item);
    }

    /// Log a food entry timestamped now. Persistence failures propagate
    /// unchanged.
    pub fn log_food(&mut self, food: FoodItem, quantity: f64) -> Result<FoodEntry, AppError> {
        self.log_food_at(food, quantity, Utc::now())
    }

    /// Log a food entry with an explicit timestamp.
    pub fn log_food_at(
        &mut self,
        food: FoodItem,
        quantity: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<FoodEntry, AppError> {
        let entry = FoodEntry {
            food,
            quantity,
            timestamp,
        };
        self.entries.push(entry.clone());
        self.entry_store.save_all(&self.entries)?;
        debug!(name = %entry.food.name, quantity = entry.quantity, "food logged");
        Ok(entry)
    }

    /// Log a food that is not part of the catalog.
    pub fn manual_entry(&mut self, food: ManualFood, quantity: f64) -> Result<FoodEntry, AppError> {
        let item = FoodItem {
            name: food.name,
            serving_size: food.serving_size,
            calories: food.calories,
            macronutrients: food.macronutrients,
            aliases: Vec::new(),
        };
        self.log_food(item, quantity)
    }

    /// All logged entries, oldest first.
    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    /// Entries logged on the given day; empty when nothing was logged.
    pub fn entries_for_day(&self, day: NaiveDate) -> DailyLog {
        let mut grouped = group_entries_by_day(&self.entries);
        grouped.remove(&day).unwrap_or_else(|| DailyLog::empty(day))
    }

    /// Per-day logs, sorted by day.
    pub fn daily_summary(&self) -> Vec<DailyLog> {
        group_entries_by_day(&self.entries).into_values().collect()
    }

    /// Calories across every logged entry.
    pub fn total_calories(&self) -> f64 {
        self.entries.iter().map(FoodEntry::calories).sum()
    }

    /// Macronutrient totals across every logged entry.
    pub fn total_macronutrients(&self) -> BTreeMap<String, f64> {
        sum_macronutrients(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FoodRecord;
    use crate::infrastructure::embedding::BagOfWordsEmbedder;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;

    /// Simple in-memory entry store
    struct MemoryEntryStore {
        entries: Mutex<Vec<FoodEntry>>,
    }

    impl MemoryEntryStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
            }
        }

        fn with_entries(entries: Vec<FoodEntry>) -> Self {
            Self {
                entries: Mutex::new(entries),
            }
        }
    }

    impl EntryStore for MemoryEntryStore {
        fn load(&self) -> io::Result<Vec<FoodEntry>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        fn save_all(&self, entries: &[FoodEntry]) -> io::Result<()> {
            *self.entries.lock().unwrap() = entries.to_vec();
            Ok(())
        }

        fn path(&self) -> &Path {
            Path::new("memory://entries")
        }
    }

    /// Store whose saves always fail
    struct FailingEntryStore;

    impl EntryStore for FailingEntryStore {
        fn load(&self) -> io::Result<Vec<FoodEntry>> {
            Ok(Vec::new())
        }

        fn save_all(&self, _entries: &[FoodEntry]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn path(&self) -> &Path {
            Path::new("memory://failing")
        }
    }

    fn engine() -> RecognitionEngine {
        let records = vec![
            FoodRecord {
                name: "Banana".to_string(),
                serving_size: "1 medium".to_string(),
                calories: 105.0,
                macronutrients: BTreeMap::from([("carbs".to_string(), 27.0)]),
                aliases: vec!["ripe banana".to_string()],
            },
            FoodRecord {
                name: "Oatmeal".to_string(),
                serving_size: "1 bowl".to_string(),
                calories: 150.0,
                macronutrients: BTreeMap::from([("carbs".to_string(), 27.0)]),
                aliases: Vec::new(),
            },
        ];
        RecognitionEngine::from_records(records, Box::new(BagOfWordsEmbedder::new())).unwrap()
    }

    fn banana() -> FoodItem {
        engine().known_items()[0].clone()
    }

    fn entry_at(food: FoodItem, quantity: f64, timestamp: &str) -> FoodEntry {
        FoodEntry {
            food,
            quantity,
            timestamp: timestamp.parse().unwrap(),
        }
    }

    #[test]
    fn test_load_restores_persisted_entries() {
        let persisted = vec![entry_at(banana(), 1.0, "2026-08-01T09:00:00Z")];
        let store = MemoryEntryStore::with_entries(persisted);
        let tracker = FoodTracker::load(engine(), Box::new(store)).unwrap();
        assert_eq!(tracker.entries().len(), 1);
        assert_eq!(tracker.total_calories(), 105.0);
    }

    #[test]
    fn test_log_food_appends_and_persists() {
        let store = Box::new(MemoryEntryStore::new());
        let mut tracker = FoodTracker::load(engine(), store).unwrap();

        let entry = tracker.log_food(banana(), 2.0).unwrap();
        assert_eq!(entry.calories(), 210.0);
        assert_eq!(tracker.entries().len(), 1);

        // persisted through the store, observable on reload
        let reloaded = tracker.entry_store.load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].food.name, "Banana");
    }

    #[test]
    fn test_log_food_propagates_store_failure() {
        let mut tracker = FoodTracker::load(engine(), Box::new(FailingEntryStore)).unwrap();
        let result = tracker.log_food(banana(), 1.0);
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_manual_entry_logs_uncatalogued_food() {
        let mut tracker = FoodTracker::load(engine(), Box::new(MemoryEntryStore::new())).unwrap();
        let entry = tracker
            .manual_entry(
                ManualFood {
                    name: "Street Tacos".to_string(),
                    serving_size: "2 tacos".to_string(),
                    calories: 340.0,
                    macronutrients: BTreeMap::from([("protein".to_string(), 18.0)]),
                },
                1.5,
            )
            .unwrap();
        assert_eq!(entry.calories(), 510.0);
        assert!(entry.food.aliases.is_empty());
        // not registered in the catalog
        assert_eq!(tracker.engine().len(), 2);
    }

    #[test]
    fn test_register_custom_food_is_recognised() {
        let mut tracker = FoodTracker::load(engine(), Box::new(MemoryEntryStore::new())).unwrap();
        tracker.register_custom_food(FoodItem {
            name: "Protein Shake".to_string(),
            serving_size: "1 shake".to_string(),
            calories: 200.0,
            macronutrients: BTreeMap::new(),
            aliases: vec!["post-workout shake".to_string()],
        });
        let results = tracker.scan_description("protein shake", 1);
        assert_eq!(results[0].item.name, "Protein Shake");
        assert!(results[0].confidence >= 0.99);
    }

    #[test]
    fn test_daily_summary_and_totals() {
        let mut tracker = FoodTracker::load(engine(), Box::new(MemoryEntryStore::new())).unwrap();
        let items = tracker.engine().known_items();
        let (banana, oatmeal) = (items[0].clone(), items[1].clone());

        tracker
            .log_food_at(banana, 1.0, "2026-08-01T08:00:00Z".parse().unwrap())
            .unwrap();
        tracker
            .log_food_at(oatmeal.clone(), 1.0, "2026-08-01T12:30:00Z".parse().unwrap())
            .unwrap();
        tracker
            .log_food_at(oatmeal, 2.0, "2026-08-02T09:00:00Z".parse().unwrap())
            .unwrap();

        let summary = tracker.daily_summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].entries.len(), 2);
        assert_eq!(summary[0].total_calories(), 255.0);
        assert_eq!(summary[1].total_calories(), 300.0);

        assert_eq!(tracker.total_calories(), 555.0);
        assert_eq!(tracker.total_macronutrients()["carbs"], 108.0);
    }

    #[test]
    fn test_entries_for_day_unknown_day_is_empty() {
        let tracker = FoodTracker::load(engine(), Box::new(MemoryEntryStore::new())).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let log = tracker.entries_for_day(day);
        assert_eq!(log.day, day);
        assert!(log.entries.is_empty());
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A food item known to the recognition catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub serving_size: String,
    pub calories: f64,
    pub macronutrients: BTreeMap<String, f64>,
    pub aliases: Vec<String>,
}

impl FoodItem {
    /// Case-insensitive lexical match: true when `text` equals or is
    /// contained within the item's name or any of its aliases.
    ///
    /// Substring containment is deliberately loose; a short description can
    /// match inside a longer, unrelated alias.
    pub fn matches(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        if self.name.to_lowercase().contains(&needle) {
            return true;
        }
        self.aliases
            .iter()
            .any(|alias| alias.to_lowercase().contains(&needle))
    }
}

/// Raw reference-dataset record.
///
/// Only `name` is required; the remaining fields fall back to the dataset
/// defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    #[serde(default = "default_serving_size")]
    pub serving_size: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub macronutrients: BTreeMap<String, f64>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_serving_size() -> String {
    "1 serving".to_string()
}

impl From<FoodRecord> for FoodItem {
    fn from(record: FoodRecord) -> Self {
        Self {
            name: record.name,
            serving_size: record.serving_size,
            calories: record.calories,
            macronutrients: record.macronutrients,
            aliases: record.aliases,
        }
    }
}

/// A logged consumption of a food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub food: FoodItem,
    pub quantity: f64,
    pub timestamp: DateTime<Utc>,
}

impl FoodEntry {
    /// Calories contributed by this entry, scaled by quantity.
    pub fn calories(&self) -> f64 {
        self.food.calories * self.quantity
    }

    /// Macronutrient amounts contributed by this entry, scaled by quantity.
    pub fn macronutrients(&self) -> BTreeMap<String, f64> {
        self.food
            .macronutrients
            .iter()
            .map(|(nutrient, amount)| (nutrient.clone(), amount * self.quantity))
            .collect()
    }

    /// UTC calendar day this entry belongs to.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// All entries logged on a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyLog {
    pub day: NaiveDate,
    pub entries: Vec<FoodEntry>,
}

impl DailyLog {
    pub fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            entries: Vec::new(),
        }
    }

    pub fn total_calories(&self) -> f64 {
        self.entries.iter().map(FoodEntry::calories).sum()
    }

    pub fn total_macronutrients(&self) -> BTreeMap<String, f64> {
        sum_macronutrients(&self.entries)
    }
}

/// Group entries by UTC day, sorted by day.
pub fn group_entries_by_day(entries: &[FoodEntry]) -> BTreeMap<NaiveDate, DailyLog> {
    let mut grouped: BTreeMap<NaiveDate, DailyLog> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(entry.day())
            .or_insert_with(|| DailyLog::empty(entry.day()))
            .entries
            .push(entry.clone());
    }
    grouped
}

/// Sum per-entry macronutrient contributions across entries.
pub fn sum_macronutrients(entries: &[FoodEntry]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        for (nutrient, amount) in entry.macronutrients() {
            *totals.entry(nutrient).or_insert(0.0) += amount;
        }
    }
    totals
}

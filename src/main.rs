use bento::{
    AppConfig, BagOfWordsEmbedder, FoodTracker, JsonReferenceStore, JsonlEntryStore,
    RecognitionEngine,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().init();

    let config = AppConfig::from_env()?;
    config.log();

    let reference = JsonReferenceStore::new(&config.reference_path);
    let engine = RecognitionEngine::load(&reference, Box::new(BagOfWordsEmbedder::new()))?
        .with_default_top_k(config.default_top_k);
    let entry_store = JsonlEntryStore::new(&config.entries_path);
    let mut tracker = FoodTracker::load(engine, Box::new(entry_store))?;

    println!("=== Food Recognition Demo ===\n");
    for description in ["banana", "grilled chicken breast", "PB&J", "bowl of oatmeal"] {
        println!("\"{}\":", description);
        for result in tracker.scan_description(description, config.default_top_k) {
            println!(
                "  {:>5.2}  {} ({})",
                result.confidence, result.item.name, result.item.serving_size
            );
        }
        println!();
    }

    let best = tracker
        .scan_description("banana", 1)
        .first()
        .map(|result| result.item.clone());
    if let Some(item) = best {
        let entry = tracker.log_food(item, 1.0)?;
        println!("logged: {} x{}", entry.food.name, entry.quantity);
    }

    println!("\n=== Daily Summary ===");
    for log in tracker.daily_summary() {
        println!(
            "{}: {:.0} kcal over {} entries",
            log.day,
            log.total_calories(),
            log.entries.len()
        );
    }
    println!("total: {:.0} kcal", tracker.total_calories());

    Ok(())
}

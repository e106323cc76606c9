pub mod config;
pub mod habit;
pub mod stats;
pub mod tip;

use habitforge_core::{Config, Database, Event, HabitTracker, SystemClock};

/// Open the tracker on the on-disk database, echoing events to stderr.
pub fn open_tracker() -> Result<HabitTracker<Database>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut tracker = HabitTracker::load(db, &config, SystemClock)?;
    tracker.subscribe(|event: &Event| {
        if let Ok(json) = serde_json::to_string(event) {
            eprintln!("event: {json}");
        }
    });
    Ok(tracker)
}

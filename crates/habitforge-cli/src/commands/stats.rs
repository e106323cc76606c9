use habitforge_core::HabitFilter;

use super::open_tracker;

pub fn run(category: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker()?;
    let filter: HabitFilter = category.parse()?;
    let snapshot = tracker.snapshot(&filter);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

pub fn progress() -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker()?;
    println!("{}", serde_json::to_string_pretty(&tracker.progress_view())?);
    Ok(())
}

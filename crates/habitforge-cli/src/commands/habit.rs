//! Habit management commands for CLI.

use clap::Subcommand;
use habitforge_core::clock::parse_date;
use habitforge_core::{Category, HabitFilter};

use super::open_tracker;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Create {
        /// Habit name
        name: String,
        /// Category: health, productivity, mindfulness, learning or any tag
        /// (default: habits.default_category from config)
        #[arg(long)]
        category: Option<String>,
        /// Free-form target, e.g. "10 pages"
        #[arg(long)]
        target: Option<String>,
    },
    /// List habits
    List {
        /// Filter by category ("all" for every habit)
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// List the category presets from habits.categories
    Categories,
    /// Get habit details
    Get {
        /// Habit ID
        id: String,
    },
    /// Delete a habit permanently
    Delete {
        /// Habit ID
        id: String,
        /// Confirm the irreversible delete
        #[arg(long)]
        yes: bool,
    },
    /// Toggle completion for today (or --date)
    Toggle {
        /// Habit ID
        id: String,
        /// Calendar date, YYYY-MM-DD (default: today, local time)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;

    match action {
        HabitAction::Create {
            name,
            category,
            target,
        } => {
            let category = match category {
                Some(c) => c.parse::<Category>()?,
                None => habitforge_core::Config::load()?.default_category(),
            };
            let habit = tracker.create_habit(&name, category, target)?;
            if !tracker.is_preset_category(&habit.category) {
                eprintln!(
                    "note: '{}' is not in habits.categories; kept as a custom tag",
                    habit.category
                );
            }
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Categories => {
            let names: Vec<&str> = tracker.categories().iter().map(|c| c.as_str()).collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        HabitAction::List { category } => {
            let filter: HabitFilter = category.parse()?;
            let views = tracker.snapshot(&filter).habits;
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        HabitAction::Get { id } => {
            let habit = tracker.get_habit(&id)?;
            println!("{}", serde_json::to_string_pretty(habit)?);
        }
        HabitAction::Delete { id, yes } => {
            if !yes {
                return Err(format!("refusing to delete {id} without --yes").into());
            }
            let removed = tracker.delete_habit(&id)?;
            println!("Habit deleted: {}", removed.id);
        }
        HabitAction::Toggle { id, date } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => tracker.today(),
            };
            let report = tracker.toggle_habit_on(&id, date)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

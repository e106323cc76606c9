//! Habit records and their collection.
//!
//! - [`Habit`]: a single tracked habit with its completion ledger
//! - [`CompletionLedger`]: the set of calendar dates a habit was done
//! - [`HabitStore`]: insertion-ordered collection with create/delete/list

mod ledger;
mod store;

pub use ledger::{CompletionLedger, ToggleOutcome};
pub use store::HabitStore;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Habit category.
///
/// The built-in set covers the usual buckets; anything else is kept as a
/// free-text tag. Serialized as a plain lowercase string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Health,
    Productivity,
    Mindfulness,
    Learning,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Health => "health",
            Category::Productivity => "productivity",
            Category::Mindfulness => "mindfulness",
            Category::Learning => "learning",
            Category::Custom(tag) => tag,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "health" => Category::Health,
            "productivity" => Category::Productivity,
            "mindfulness" => Category::Mindfulness,
            "learning" => Category::Learning,
            _ => Category::Custom(s.trim().to_string()),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection applied to listings and displays. Never mutates the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HabitFilter {
    #[default]
    All,
    Category(Category),
}

impl HabitFilter {
    pub fn matches(&self, habit: &Habit) -> bool {
        match self {
            HabitFilter::All => true,
            HabitFilter::Category(c) => &habit.category == c,
        }
    }
}

impl FromStr for HabitFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(HabitFilter::All)
        } else {
            Ok(HabitFilter::Category(Category::from(s.to_string())))
        }
    }
}

/// A tracked habit.
///
/// Serialized with the field names the persisted collection uses:
/// `id, name, category, target, completedDates, createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub completed_dates: CompletionLedger,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Target, treating a blank string as absent.
    pub fn target(&self) -> Option<&str> {
        self.target
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(date)
    }
}

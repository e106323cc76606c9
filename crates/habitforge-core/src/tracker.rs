//! Habit tracker: the application state object.
//!
//! Owns the habit collection, the progression engine, the persistence
//! backend, a clock and the event subscribers. Constructed from persisted
//! data at startup and written back on every mutation.
//!
//! ## Mutation protocol
//!
//! ```text
//! clone state -> validate + mutate clone -> persist clone -> swap in -> emit events
//! ```
//!
//! A failure at any step returns the error with in-memory and persisted
//! state both unchanged, and no events are emitted.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = HabitTracker::load(Database::open()?, &Config::load()?, SystemClock)?;
//! let id = tracker.create_habit("Read", Category::Learning, None)?.id;
//! tracker.toggle_habit(&id)?;
//! println!("{}", serde_json::to_string_pretty(&tracker.snapshot(&HabitFilter::All))?);
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::clock::Clock;
use crate::error::{PersistenceError, Result};
use crate::events::{Event, EventSink};
use crate::habit::{Category, Habit, HabitFilter, HabitStore};
use crate::metrics;
use crate::progression::{ProgressionEngine, UserProgress};
use crate::storage::{Config, KvStore, HABITS_KEY, USER_KEY};
use crate::streak;

/// Result of toggling a habit for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReport {
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    /// Levels reached by this toggle, ascending. Empty for most toggles.
    pub level_ups: Vec<u32>,
}

/// Level and experience as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub level: u32,
    pub xp: u64,
    pub xp_needed: u64,
    pub total_xp: u64,
    pub progress_pct: f64,
    pub title: String,
}

/// A habit plus the values derived from its ledger. Keys share the
/// habit record's camelCase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitView {
    #[serde(flatten)]
    pub habit: Habit,
    pub streak: u32,
    pub done_today: bool,
}

/// Everything a renderer needs, computed fresh from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub date: NaiveDate,
    pub habits: Vec<HabitView>,
    pub habit_count: usize,
    pub streak: u32,
    pub completed_today: usize,
    pub weekly_ratio: u32,
    pub progress: ProgressView,
}

pub struct HabitTracker<S: KvStore> {
    store: S,
    habits: HabitStore,
    progression: ProgressionEngine,
    categories: Vec<Category>,
    clock: Box<dyn Clock>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl<S: KvStore> HabitTracker<S> {
    /// Build the tracker from whatever `store` holds.
    ///
    /// Missing keys start empty (no habits, level 1 with 0 xp).
    ///
    /// # Errors
    /// Returns `PersistenceError` if a read fails, a stored record
    /// cannot be decoded, or the progression record is out of range.
    pub fn load(store: S, config: &Config, clock: impl Clock + 'static) -> Result<Self> {
        let habits = match store.get(HABITS_KEY)? {
            Some(raw) => HabitStore::from_habits(decode(HABITS_KEY, &raw)?),
            None => HabitStore::new(),
        };
        let progress: UserProgress = match store.get(USER_KEY)? {
            Some(raw) => decode(USER_KEY, &raw)?,
            None => UserProgress::default(),
        };

        tracing::debug!(
            habits = habits.len(),
            level = progress.level,
            xp = progress.xp,
            "loaded tracker state"
        );

        let progression = ProgressionEngine::new(progress, config.progression_rules()).map_err(
            |e| PersistenceError::Corrupt {
                key: USER_KEY.to_string(),
                message: e.to_string(),
            },
        )?;

        Ok(Self {
            store,
            habits,
            progression,
            categories: config.categories(),
            clock: Box::new(clock),
            sinks: Vec::new(),
        })
    }

    /// Register an event subscriber.
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn habits(&self) -> &HabitStore {
        &self.habits
    }

    pub fn get_habit(&self, id: &str) -> Result<&Habit> {
        self.habits.get(id)
    }

    pub fn list_habits(&self, filter: &HabitFilter) -> Vec<&Habit> {
        self.habits.list(filter)
    }

    /// Category presets from `[habits].categories`.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_preset_category(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    pub fn progress(&self) -> UserProgress {
        self.progression.state()
    }

    pub fn progress_view(&self) -> ProgressView {
        ProgressView {
            level: self.progression.level(),
            xp: self.progression.xp(),
            xp_needed: self.progression.xp_needed(),
            total_xp: self.progression.total_xp(),
            progress_pct: self.progression.progress_pct(),
            title: self.progression.title().to_string(),
        }
    }

    /// Global streak across all habits.
    pub fn streak(&self) -> u32 {
        streak::calculate_streak(self.habits.iter(), self.today())
    }

    pub fn habit_streak(&self, id: &str) -> Result<u32> {
        let habit = self.habits.get(id)?;
        Ok(streak::calculate_habit_streak(&habit.completed_dates, self.today()))
    }

    pub fn completed_today(&self) -> usize {
        metrics::completed_today(self.habits.iter(), self.today())
    }

    pub fn weekly_ratio(&self) -> u32 {
        metrics::weekly_ratio(self.habits.iter().as_slice(), self.today())
    }

    /// Full derived state. `filter` narrows the habit list only; the
    /// aggregate counters always cover every habit.
    pub fn snapshot(&self, filter: &HabitFilter) -> Snapshot {
        let today = self.today();
        let habits = self
            .habits
            .list(filter)
            .into_iter()
            .map(|h| HabitView {
                streak: streak::calculate_habit_streak(&h.completed_dates, today),
                done_today: h.is_completed_on(today),
                habit: h.clone(),
            })
            .collect();

        Snapshot {
            date: today,
            habits,
            habit_count: self.habits.len(),
            streak: self.streak(),
            completed_today: self.completed_today(),
            weekly_ratio: self.weekly_ratio(),
            progress: self.progress_view(),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a habit and persist the collection.
    ///
    /// Categories outside the configured presets are accepted as free-text
    /// tags; see [`HabitTracker::is_preset_category`].
    ///
    /// # Errors
    /// `ValidationError` for a blank name, `PersistenceError` if the write
    /// fails. Nothing is appended in either case.
    pub fn create_habit(
        &mut self,
        name: &str,
        category: Category,
        target: Option<String>,
    ) -> Result<Habit> {
        let now: DateTime<Utc> = self.clock.now();
        let mut habits = self.habits.clone();
        let habit = habits.create(name, category, target, now)?.clone();

        self.commit(habits, self.progression.clone())?;
        if !self.is_preset_category(&habit.category) {
            tracing::debug!(category = %habit.category, "category is not a configured preset");
        }
        tracing::info!(id = %habit.id, name = %habit.name, "habit created");
        self.emit(&[Event::HabitCreated {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
        }]);
        Ok(habit)
    }

    /// Permanently delete a habit. Experience already earned is kept.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `PersistenceError` if the write fails.
    pub fn delete_habit(&mut self, id: &str) -> Result<Habit> {
        let mut habits = self.habits.clone();
        let removed = habits.delete(id)?;

        self.commit(habits, self.progression.clone())?;
        tracing::info!(id = %removed.id, name = %removed.name, "habit deleted");
        self.emit(&[Event::HabitDeleted {
            habit_id: removed.id.clone(),
        }]);
        Ok(removed)
    }

    /// Toggle today's completion for a habit.
    pub fn toggle_habit(&mut self, id: &str) -> Result<ToggleReport> {
        let today = self.today();
        self.toggle_habit_on(id, today)
    }

    /// Toggle completion for an explicit calendar date.
    ///
    /// Completing credits `xp_per_habit`; un-completing debits it (floored
    /// at zero, never de-levelling).
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Progression` if the credit would pass
    /// the level cap, `PersistenceError` if the write fails.
    pub fn toggle_habit_on(&mut self, id: &str, date: NaiveDate) -> Result<ToggleReport> {
        let mut habits = self.habits.clone();
        let mut progression = self.progression.clone();

        let outcome = habits.get_mut(id)?.completed_dates.toggle(date);
        let level_events = progression.apply_toggle(outcome.completed)?;

        self.commit(habits, progression)?;
        tracing::debug!(id, %date, completed = outcome.completed, "habit toggled");

        let mut events = vec![Event::HabitToggled {
            habit_id: id.to_string(),
            date,
            completed: outcome.completed,
        }];
        let level_ups = level_events
            .iter()
            .filter_map(|e| match e {
                Event::LevelUp { new_level } => Some(*new_level),
                _ => None,
            })
            .collect();
        events.extend(level_events);
        self.emit(&events);

        Ok(ToggleReport {
            habit_id: id.to_string(),
            date,
            completed: outcome.completed,
            level_ups,
        })
    }

    fn commit(&mut self, habits: HabitStore, progression: ProgressionEngine) -> Result<()> {
        let entries = [
            (HABITS_KEY, serde_json::to_string(&habits)?),
            (USER_KEY, serde_json::to_string(&progression.state())?),
        ];
        if let Err(e) = self.store.set_many(&entries) {
            tracing::warn!(error = %e, "persist failed; keeping previous state");
            return Err(e.into());
        }
        self.habits = habits;
        self.progression = progression;
        Ok(())
    }

    fn emit(&mut self, events: &[Event]) {
        for event in events {
            for sink in &mut self.sinks {
                sink.emit(event);
            }
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        PersistenceError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

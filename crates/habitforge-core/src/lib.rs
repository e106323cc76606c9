//! # HabitForge Core Library
//!
//! This library provides the core logic for the HabitForge habit tracker:
//! turning a log of completion dates into streaks, weekly ratios and an
//! experience/level progression. Rendering and visual effects live outside
//! the core and consume its snapshots and events.
//!
//! ## Architecture
//!
//! - **Habit Store**: insertion-ordered habit collection with create/delete/list
//! - **Completion Ledger**: per-habit set of calendar dates with strict toggle
//! - **Streaks**: pure functions over completion dates, per habit and global
//! - **Progression**: `(level, xp)` state machine with looping level-ups
//! - **Metrics**: today's count and the ISO-week completion ratio
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitTracker`]: application state object tying everything together
//! - [`ProgressionEngine`]: experience and level transitions
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod habit;
pub mod metrics;
pub mod progression;
pub mod storage;
pub mod streak;
pub mod tracker;
pub mod wisdom;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, PersistenceError, ProgressionError, ValidationError};
pub use events::{Event, EventSink};
pub use habit::{Category, CompletionLedger, Habit, HabitFilter, HabitStore, ToggleOutcome};
pub use progression::{ProgressionEngine, ProgressionRules, UserProgress};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use streak::{calculate_habit_streak, calculate_streak};
pub use tracker::{HabitTracker, HabitView, ProgressView, Snapshot, ToggleReport};

//! Experience and level state machine.
//!
//! ## Transitions
//!
//! ```text
//! credit(n): xp += n; while xp >= level * xp_per_level { xp -= threshold; level += 1 }
//! debit(n):  xp = xp - n, floored at 0 (never de-levels)
//! ```
//!
//! The level threshold grows linearly: level N needs `N * xp_per_level`
//! experience to advance. A single credit may cross several thresholds and
//! produces one [`Event::LevelUp`] per level gained.
//!
//! Levels stop at [`MAX_LEVEL`]. Experience that would carry past it is
//! refused with [`ProgressionError::LevelCap`] and the state is left as it was.

use serde::{Deserialize, Serialize};

use crate::error::ProgressionError;
use crate::events::Event;

pub const XP_PER_HABIT: u64 = 10;
pub const XP_PER_LEVEL: u64 = 100;

pub const MAX_LEVEL: u32 = 10_000;
pub const MAX_XP_PER_HABIT: u64 = 1_000_000;
pub const MAX_XP_PER_LEVEL: u64 = 1_000_000;

pub const DEFAULT_TITLES: &[&str] = &[
    "Pemula",
    "Murid",
    "Petualang",
    "Pejuang",
    "Ahli",
    "Master",
    "Grandmaster",
    "Legenda",
];

/// Persisted progression record: `{ "xp": .., "level": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub xp: u64,
    pub level: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

/// Tunables for the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionRules {
    pub xp_per_habit: u64,
    pub xp_per_level: u64,
    pub titles: Vec<String>,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            xp_per_habit: XP_PER_HABIT,
            xp_per_level: XP_PER_LEVEL,
            titles: DEFAULT_TITLES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    state: UserProgress,
    rules: ProgressionRules,
}

impl ProgressionEngine {
    /// Build an engine from a stored record.
    ///
    /// A record that breaks `0 <= xp < level * xp_per_level` (hand-edited
    /// data, or a lowered `xp_per_level`) is settled by applying the
    /// pending level-ups without emitting events. Rules are clamped to
    /// `1..=MAX_XP_PER_LEVEL` and `..=MAX_XP_PER_HABIT`.
    ///
    /// # Errors
    /// `LevelCap` if the record is above [`MAX_LEVEL`] or its experience
    /// would settle past it.
    pub fn new(state: UserProgress, mut rules: ProgressionRules) -> Result<Self, ProgressionError> {
        rules.xp_per_level = rules.xp_per_level.clamp(1, MAX_XP_PER_LEVEL);
        rules.xp_per_habit = rules.xp_per_habit.min(MAX_XP_PER_HABIT);
        if state.level > MAX_LEVEL {
            return Err(ProgressionError::LevelCap { max: MAX_LEVEL });
        }
        let mut engine = Self {
            state: UserProgress {
                xp: state.xp,
                level: state.level.max(1),
            },
            rules,
        };
        let settled = engine.settle()?;
        if !settled.is_empty() {
            tracing::debug!(levels = settled.len(), "settled stored progression record");
        }
        Ok(engine)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> UserProgress {
        self.state
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn xp(&self) -> u64 {
        self.state.xp
    }

    pub fn rules(&self) -> &ProgressionRules {
        &self.rules
    }

    /// Experience needed to leave the current level.
    pub fn xp_needed(&self) -> u64 {
        u64::from(self.state.level) * self.rules.xp_per_level
    }

    /// Display-only total: `(level - 1) * xp_per_level + xp`.
    pub fn total_xp(&self) -> u64 {
        u64::from(self.state.level - 1) * self.rules.xp_per_level + self.state.xp
    }

    /// 0.0 .. 100.0 progress within the current level.
    pub fn progress_pct(&self) -> f64 {
        let needed = self.xp_needed();
        if needed == 0 {
            return 0.0;
        }
        (self.state.xp as f64 / needed as f64 * 100.0).min(100.0)
    }

    /// Title for the current level; levels past the list keep the last one.
    pub fn title(&self) -> &str {
        title_for(&self.rules.titles, self.state.level)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Add experience, levelling up as many times as the total allows.
    ///
    /// # Errors
    /// `LevelCap` if the credit would carry past [`MAX_LEVEL`]. The state
    /// is unchanged in that case.
    pub fn credit(&mut self, amount: u64) -> Result<Vec<Event>, ProgressionError> {
        let before = self.state;
        self.state.xp = self.state.xp.saturating_add(amount);
        let gained = match self.settle() {
            Ok(gained) => gained,
            Err(e) => {
                self.state = before;
                return Err(e);
            }
        };
        Ok(gained
            .into_iter()
            .map(|new_level| {
                tracing::info!(new_level, "level up");
                Event::LevelUp { new_level }
            })
            .collect())
    }

    /// Remove experience, flooring at zero within the current level.
    pub fn debit(&mut self, amount: u64) {
        self.state.xp = self.state.xp.saturating_sub(amount);
    }

    /// Apply the reward rule for one toggle direction.
    pub fn apply_toggle(&mut self, completed: bool) -> Result<Vec<Event>, ProgressionError> {
        if completed {
            self.credit(self.rules.xp_per_habit)
        } else {
            self.debit(self.rules.xp_per_habit);
            Ok(Vec::new())
        }
    }

    // At most MAX_LEVEL iterations: every pass raises the level by one.
    fn settle(&mut self) -> Result<Vec<u32>, ProgressionError> {
        let mut gained = Vec::new();
        loop {
            let threshold = self.xp_needed();
            if self.state.xp < threshold {
                break;
            }
            if self.state.level >= MAX_LEVEL {
                return Err(ProgressionError::LevelCap { max: MAX_LEVEL });
            }
            self.state.xp -= threshold;
            self.state.level += 1;
            gained.push(self.state.level);
        }
        Ok(gained)
    }
}

pub fn title_for(titles: &[String], level: u32) -> &str {
    if titles.is_empty() {
        return "";
    }
    let idx = (level.max(1) as usize - 1).min(titles.len() - 1);
    &titles[idx]
}

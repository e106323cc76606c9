use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

use super::{Category, CompletionLedger, Habit, HabitFilter};
use crate::error::{CoreError, Result, ValidationError};

/// Insertion-ordered collection of habits.
///
/// Pure in-memory state; the tracker decides when it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_habits(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    /// Append a new habit with an empty ledger.
    ///
    /// The id is a time-ordered UUID derived from `created_at`; on the
    /// off chance it collides with an existing id a fresh one is drawn.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyName` if `name` is blank. Nothing is
    /// appended in that case.
    pub fn create(
        &mut self,
        name: &str,
        category: Category,
        target: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<&Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let mut id = Self::id_for(created_at);
        while self.contains(&id) {
            id = Self::id_for(created_at);
        }

        self.habits.push(Habit {
            id,
            name: name.to_string(),
            category,
            target: target
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            completed_dates: CompletionLedger::new(),
            created_at,
        });
        let idx = self.habits.len() - 1;
        Ok(&self.habits[idx])
    }

    fn id_for(created_at: DateTime<Utc>) -> String {
        let secs = created_at.timestamp().max(0) as u64;
        let nanos = created_at.timestamp_subsec_nanos();
        Uuid::new_v7(Timestamp::from_unix(NoContext, secs, nanos)).to_string()
    }

    /// Remove a habit permanently and return it.
    ///
    /// # Errors
    /// Returns `CoreError::NotFound` if no habit has this id; the store is
    /// left unchanged.
    pub fn delete(&mut self, id: &str) -> Result<Habit> {
        let idx = self
            .position(id)
            .ok_or_else(|| CoreError::not_found(id))?;
        Ok(self.habits.remove(idx))
    }

    pub fn get(&self, id: &str) -> Result<&Habit> {
        self.habits
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::not_found(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Habit> {
        self.habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::not_found(id))
    }

    /// Habits matching `filter`, in insertion order.
    pub fn list(&self, filter: &HabitFilter) -> Vec<&Habit> {
        self.habits.iter().filter(|h| filter.matches(h)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.habits.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.habits.iter().position(|h| h.id == id)
    }
}

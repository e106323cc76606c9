use std::collections::HashMap;

use super::KvStore;
use crate::error::PersistenceError;

/// In-process key-value store.
///
/// `fail_writes` makes every subsequent write fail, which lets callers
/// exercise their rollback paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), PersistenceError> {
        if self.fail_writes {
            let key = entries.first().map(|(k, _)| *k).unwrap_or_default();
            return Err(PersistenceError::WriteFailed {
                key: key.to_string(),
                message: "writes disabled".into(),
            });
        }
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

use crate::error::RmcError;
use crate::weightment::WeightmentEntry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Recorded weightment entries. Entries are added or deleted, never edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightmentLog {
    entries: Vec<WeightmentEntry>,
}

impl WeightmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: WeightmentEntry) {
        self.entries.push(entry);
    }

    pub fn get(&self, id: Uuid) -> Option<&WeightmentEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<WeightmentEntry, RmcError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(RmcError::EntryNotFound(id))?;
        Ok(self.entries.remove(index))
    }

    /// Delete every entry whose id is in `ids`, returning how many were removed.
    ///
    /// Fails with [`RmcError::EntryNotFound`] for the first unknown id and
    /// leaves the log untouched, so a batch behaves like repeated [`delete`].
    ///
    /// [`delete`]: WeightmentLog::delete
    pub fn delete_many(&mut self, ids: &[Uuid]) -> Result<usize, RmcError> {
        if let Some(missing) = ids.iter().find(|id| self.get(**id).is_none()) {
            return Err(RmcError::EntryNotFound(*missing));
        }
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        Ok(before - self.entries.len())
    }

    /// Entries ordered by timestamp, most recent first.
    pub fn newest_first(&self) -> Vec<&WeightmentEntry> {
        let mut entries: Vec<&WeightmentEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a log file; a missing file is an empty log.
    pub fn load(path: &Path) -> Result<Self, RmcError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), RmcError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

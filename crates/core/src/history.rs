use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub original: String,
    pub translated: String,
    pub date: String,
}

impl HistoryEntry {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Bounded translation history, newest first. Pushing past capacity evicts
/// the oldest entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.insert(0, entry);
        if self.entries.len() > self.capacity {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Loads a history persisted as a JSON array of entries; a missing
    /// file yields an empty history. Entries beyond capacity are dropped.
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let mut entries: Vec<HistoryEntry> = serde_json::from_str(&raw)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        entries.truncate(DEFAULT_CAPACITY);
        Ok(Self {
            entries,
            capacity: DEFAULT_CAPACITY,
        })
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            original: format!("orig {n}"),
            translated: format!("trans {n}"),
            date: "2026-01-01 00:00:00".to_owned(),
        }
    }

    #[test]
    fn newest_entry_comes_first() {
        let mut history = History::default();
        history.push(entry(1));
        history.push(entry(2));

        let originals: Vec<_> = history.iter().map(|e| e.original.as_str()).collect();
        assert_eq!(originals, vec!["orig 2", "orig 1"]);
    }

    #[test]
    fn push_past_capacity_evicts_oldest() {
        let mut history = History::new(3);
        for n in 1..=3 {
            assert_eq!(history.push(entry(n)), None);
        }
        let evicted = history.push(entry(4));
        assert_eq!(evicted, Some(entry(1)));
        assert_eq!(history.len(), 3);
        assert_eq!(history.iter().next().unwrap().original, "orig 4");
    }

    #[test]
    fn clear_empties_the_history() {
        let mut history = History::default();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn load_missing_file_yields_empty_history() {
        let path = std::env::temp_dir().join("textlens-history-missing.json");
        let history = History::load(&path).expect("missing file is fine");
        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "textlens-history-{}.json",
            std::process::id()
        ));
        let mut history = History::default();
        history.push(entry(1));
        history.push(entry(2));

        history.save(&path).expect("save");
        let loaded = History::load(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, history);
    }
}

//! Browser LocalStorage (wasm only)
//!
//! Each key holds CSV text in the same row format the native files use.

use web_sys::Storage;

use super::PersistenceSink;
use crate::error::PersistenceError;
use crate::history::{self, HistoryRecord};
use crate::names::{self, NameRegistry};

/// LocalStorage key for match history
const HISTORY_KEY: &str = "scorekeeper_history";

/// LocalStorage key for remembered names
const NAMES_KEY: &str = "scorekeeper_names";

pub struct LocalStorageSink {
    storage: Storage,
}

impl LocalStorageSink {
    /// Grab the window's LocalStorage
    pub fn open() -> Result<Self, PersistenceError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Storage("LocalStorage unavailable".into()))?;
        Ok(Self { storage })
    }

    fn read(&self, key: &str) -> Result<String, PersistenceError> {
        self.storage
            .get_item(key)
            .map(Option::unwrap_or_default)
            .map_err(|e| PersistenceError::Storage(format!("read {key}: {e:?}")))
    }

    fn append(&self, key: &str, line: &str) -> Result<(), PersistenceError> {
        let mut text = self.read(key)?;
        text.push_str(line);
        self.storage
            .set_item(key, &text)
            .map_err(|e| PersistenceError::Storage(format!("write {key}: {e:?}")))
    }
}

impl PersistenceSink for LocalStorageSink {
    fn append_history(&mut self, record: &HistoryRecord) -> Result<(), PersistenceError> {
        self.append(HISTORY_KEY, &history::to_csv_line(record)?)?;
        log::info!("Match recorded in LocalStorage");
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<HistoryRecord>, PersistenceError> {
        history::read_records(self.read(HISTORY_KEY)?.as_bytes())
    }

    fn load_names(&self) -> Result<NameRegistry, PersistenceError> {
        names::read_names(self.read(NAMES_KEY)?.as_bytes())
    }

    fn append_name(&mut self, name: &str) -> Result<(), PersistenceError> {
        let name = name.trim();
        if name.is_empty() || self.load_names()?.contains(name) {
            return Ok(());
        }
        let mut buf = Vec::new();
        names::write_names(&mut buf, &[name])?;
        self.append(NAMES_KEY, &String::from_utf8_lossy(&buf))?;
        log::info!("Remembered player {name}");
        Ok(())
    }
}

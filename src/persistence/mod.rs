//! History and name registry storage
//!
//! Features:
//! - Append-only CSV history rows
//! - Deduplicated name registry (checked on read and before write)
//! - File sink on native, LocalStorage sink in the browser
//! - In-memory sink for tests and storage-less runs

use crate::error::PersistenceError;
use crate::history::HistoryRecord;
use crate::names::NameRegistry;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileSink;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageSink;

/// Where finished matches and remembered names go
pub trait PersistenceSink {
    /// Append one finished match
    fn append_history(&mut self, record: &HistoryRecord) -> Result<(), PersistenceError>;

    /// Every stored match, oldest first
    fn load_history(&self) -> Result<Vec<HistoryRecord>, PersistenceError>;

    /// Remembered names, deduplicated
    fn load_names(&self) -> Result<NameRegistry, PersistenceError>;

    /// Remember a name unless it is already stored
    fn append_name(&mut self, name: &str) -> Result<(), PersistenceError>;
}

/// Keeps everything in memory; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub history: Vec<HistoryRecord>,
    pub names: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceSink for MemorySink {
    fn append_history(&mut self, record: &HistoryRecord) -> Result<(), PersistenceError> {
        self.history.push(record.clone());
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<HistoryRecord>, PersistenceError> {
        Ok(self.history.clone())
    }

    fn load_names(&self) -> Result<NameRegistry, PersistenceError> {
        Ok(NameRegistry::from_names(&self.names))
    }

    fn append_name(&mut self, name: &str) -> Result<(), PersistenceError> {
        if !self.load_names()?.contains(name) {
            self.names.push(name.trim().to_string());
        }
        Ok(())
    }
}

impl<S: PersistenceSink + ?Sized> PersistenceSink for Box<S> {
    fn append_history(&mut self, record: &HistoryRecord) -> Result<(), PersistenceError> {
        (**self).append_history(record)
    }

    fn load_history(&self) -> Result<Vec<HistoryRecord>, PersistenceError> {
        (**self).load_history()
    }

    fn load_names(&self) -> Result<NameRegistry, PersistenceError> {
        (**self).load_names()
    }

    fn append_name(&mut self, name: &str) -> Result<(), PersistenceError> {
        (**self).append_name(name)
    }
}

//! CSV files on disk (native only)

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use super::PersistenceSink;
use crate::error::PersistenceError;
use crate::history::{self, HistoryRecord};
use crate::names::{self, NameRegistry};
use crate::settings::Settings;

/// History and names in two append-only CSV files
#[derive(Debug, Clone)]
pub struct FileSink {
    history_path: PathBuf,
    names_path: PathBuf,
}

impl FileSink {
    pub fn new(history_path: impl Into<PathBuf>, names_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            names_path: names_path.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.history_path, &settings.names_path)
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn names_path(&self) -> &Path {
        &self.names_path
    }
}

/// Open for appending, creating the file on first write
fn open_append(path: &Path) -> Result<File, PersistenceError> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Open for reading; a missing file reads as empty
fn open_existing(path: &Path) -> Result<Option<File>, PersistenceError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl PersistenceSink for FileSink {
    fn append_history(&mut self, record: &HistoryRecord) -> Result<(), PersistenceError> {
        let file = open_append(&self.history_path)?;
        history::write_records(file, std::slice::from_ref(record))?;
        log::info!("Match recorded in {}", self.history_path.display());
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<HistoryRecord>, PersistenceError> {
        match open_existing(&self.history_path)? {
            Some(file) => history::read_records(file),
            None => Ok(Vec::new()),
        }
    }

    fn load_names(&self) -> Result<NameRegistry, PersistenceError> {
        match open_existing(&self.names_path)? {
            Some(file) => names::read_names(file),
            None => Ok(NameRegistry::new()),
        }
    }

    fn append_name(&mut self, name: &str) -> Result<(), PersistenceError> {
        let name = name.trim();
        if name.is_empty() || self.load_names()?.contains(name) {
            return Ok(());
        }
        let file = open_append(&self.names_path)?;
        names::write_names(file, &[name])?;
        log::info!("Remembered player {name}");
        Ok(())
    }
}

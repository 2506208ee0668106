//! Remembered player names
//!
//! Append-only and deduplicated. Used to pre-fill the setup form.

use std::io;

use crate::error::PersistenceError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRegistry {
    /// Names in order of first appearance
    names: Vec<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Build from stored rows, dropping blanks and repeats
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.insert(name.as_ref());
        }
        registry
    }

    /// Remember a name. Returns true if it was not known yet.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Known names starting with `prefix`, ignoring case
    pub fn suggestions<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a str> {
        let prefix = prefix.trim().to_lowercase();
        self.names
            .iter()
            .filter(move |n| n.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
    }
}

/// Read one name per CSV row
pub fn read_names<R: io::Read>(reader: R) -> Result<NameRegistry, PersistenceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut names = Vec::new();
    for row in rdr.records() {
        let row = row?;
        if let Some(name) = row.get(0) {
            names.push(name.to_string());
        }
    }
    Ok(NameRegistry::from_names(names))
}

/// Write each name as its own CSV row
pub fn write_names<W: io::Write>(writer: W, names: &[&str]) -> Result<(), PersistenceError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for name in names {
        wtr.write_record([name])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedupes() {
        let mut registry = NameRegistry::new();
        assert!(registry.insert("Ann"));
        assert!(registry.insert("Bob"));
        assert!(!registry.insert("Ann"));
        assert!(!registry.insert(" Ann "));
        assert!(!registry.insert("   "));
        assert_eq!(registry.names(), ["Ann", "Bob"]);
    }

    #[test]
    fn test_from_names_dedupes_on_read() {
        let registry = NameRegistry::from_names(["Bob", "Ann", "Bob", "", "Cat"]);
        assert_eq!(registry.names(), ["Bob", "Ann", "Cat"]);
    }

    #[test]
    fn test_suggestions_case_insensitive() {
        let registry = NameRegistry::from_names(["Anna", "bob", "annie", "Bobby"]);
        let found: Vec<_> = registry.suggestions("an").collect();
        assert_eq!(found, vec!["Anna", "annie"]);
        let found: Vec<_> = registry.suggestions("BOB").collect();
        assert_eq!(found, vec!["bob", "Bobby"]);
        assert_eq!(registry.suggestions("").count(), 4);
    }

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        write_names(&mut buf, &["Ann", "Smith, Bob"]).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "Ann\n\"Smith, Bob\"\n");

        let registry = read_names(&buf[..]).unwrap();
        assert_eq!(registry.names(), ["Ann", "Smith, Bob"]);
    }
}

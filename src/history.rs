//! Match history log
//!
//! One CSV row per finished match, appended and never rewritten:
//! `player1,player2,score1,score2,MMDDYY`, no header row.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::sim::GameResult;

/// A single finished match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub player1_name: String,
    pub player2_name: String,
    pub player1_score: u32,
    pub player2_score: u32,
    /// Local date the match ended, `MMDDYY`
    pub date: String,
}

impl HistoryRecord {
    pub fn from_result(result: &GameResult, date: impl Into<String>) -> Self {
        Self {
            player1_name: result.player1_name.clone(),
            player2_name: result.player2_name.clone(),
            player1_score: result.player1_score,
            player2_score: result.player2_score,
            date: date.into(),
        }
    }

    /// Name of the higher scorer (None on a tie, which finished matches never have)
    pub fn winner_name(&self) -> Option<&str> {
        match self.player1_score.cmp(&self.player2_score) {
            std::cmp::Ordering::Greater => Some(&self.player1_name),
            std::cmp::Ordering::Less => Some(&self.player2_name),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Append `records` as header-less CSV rows
pub fn write_records<W: io::Write>(
    writer: W,
    records: &[HistoryRecord],
) -> Result<(), PersistenceError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read every row of a history file
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<HistoryRecord>, PersistenceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Render a single record as one CSV line (trailing newline included)
pub fn to_csv_line(record: &HistoryRecord) -> Result<String, PersistenceError> {
    let mut buf = Vec::new();
    write_records(&mut buf, std::slice::from_ref(record))?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Per-player totals across the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub name: String,
    pub played: u32,
    pub won: u32,
}

/// Loaded match history
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    pub records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent `n` matches, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().rev().take(n)
    }

    /// Totals per player, most wins first, then by name
    pub fn summary(&self) -> Vec<PlayerSummary> {
        let mut totals: Vec<PlayerSummary> = Vec::new();

        for record in &self.records {
            let winner = record.winner_name();
            for name in [&record.player1_name, &record.player2_name] {
                let idx = match totals.iter().position(|t| &t.name == name) {
                    Some(idx) => idx,
                    None => {
                        totals.push(PlayerSummary {
                            name: name.clone(),
                            played: 0,
                            won: 0,
                        });
                        totals.len() - 1
                    }
                };
                totals[idx].played += 1;
                if winner == Some(name.as_str()) {
                    totals[idx].won += 1;
                }
            }
        }

        totals.sort_by(|a, b| b.won.cmp(&a.won).then_with(|| a.name.cmp(&b.name)));
        totals
    }
}

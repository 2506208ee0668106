//! Scorekeeper - A two-player tap scoreboard
//!
//! Core modules:
//! - `sim`: Pure match logic (scores, win-by-two, sudden death, event dispatch)
//! - `controller`: Owns the match and applies storage side effects
//! - `persistence`: History/name storage (CSV files, LocalStorage, memory)
//! - `platform`: Browser/native platform abstraction
//! - `ui`: Display surface trait and effect rendering

pub mod controller;
pub mod error;
pub mod history;
pub mod names;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use controller::MatchController;
pub use error::{Error, PersistenceError, Result, ValidationError};
pub use history::{HistoryLog, HistoryRecord};
pub use names::NameRegistry;
pub use settings::{Settings, Variant};

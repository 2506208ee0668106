//! Match simulation module
//!
//! All scoring logic lives here. This module must stay pure:
//! - No storage, clock or display access
//! - Every transition goes through `event::apply`
//! - Invalid input leaves the session untouched

pub mod event;
pub mod rules;
pub mod state;

pub use event::{Effect, MatchEvent, apply, handle_event};
pub use rules::{WIN_MARGIN, evaluate_sudden_death, evaluate_winner, parse_point_goal};
pub use state::{
    GameOverChoice, GameResult, MatchConfig, MatchPhase, MatchState, Session, Side, SuddenDeath,
};

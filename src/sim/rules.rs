//! Scoring rules
//!
//! Pure functions over a config and a state. No phase changes happen here.

use super::state::{MatchConfig, MatchState, Side, SuddenDeath};
use crate::error::ValidationError;

/// Minimum lead required to close out a game
pub const WIN_MARGIN: u32 = 2;

/// Parse the point goal field. Only plain ASCII digits are accepted, and
/// the value must be at least 1.
pub fn parse_point_goal(text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    let invalid = || ValidationError::InvalidGoal(text.to_string());

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match trimmed.parse::<u32>() {
        Ok(goal) if goal > 0 => Ok(goal),
        _ => Err(invalid()),
    }
}

/// The winning side, if the game is over: someone reached the goal and
/// leads by at least [`WIN_MARGIN`].
pub fn evaluate_winner(config: &MatchConfig, state: &MatchState) -> Option<Side> {
    let goal_reached =
        state.player1_score >= config.point_goal || state.player2_score >= config.point_goal;

    if goal_reached && state.margin() >= WIN_MARGIN {
        state.leader()
    } else {
        None
    }
}

/// Sudden death kicks in once a score reaches `point_goal - 1`. A tie at
/// or past the threshold shows nothing.
pub fn evaluate_sudden_death(config: &MatchConfig, state: &MatchState) -> SuddenDeath {
    let threshold = config.sudden_death_threshold();
    let (p1, p2) = (state.player1_score, state.player2_score);

    if p1 < threshold && p2 < threshold {
        return SuddenDeath::None;
    }

    match state.leader() {
        Some(Side::Left) => SuddenDeath::RightIsLosing,
        Some(Side::Right) => SuddenDeath::LeftIsLosing,
        None => SuddenDeath::None,
    }
}

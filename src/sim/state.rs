//! Match state and core scorekeeping types
//!
//! Everything a match needs to resume lives in [`Session`]; the front-ends
//! only hold a controller around it.

use serde::{Deserialize, Serialize};

use super::rules;
use crate::error::ValidationError;
use crate::settings::Variant;

/// Half of the display surface. Left always maps to player 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Label used in prompts and error messages
    pub fn player_label(&self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for names and a point goal
    #[default]
    Setup,
    /// Taps are being counted
    InProgress,
    /// Someone won; waiting for rematch or new game
    Finished,
}

/// Players and point goal, fixed for the duration of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub player1_name: String,
    pub player2_name: String,
    pub point_goal: u32,
}

impl MatchConfig {
    /// Validate raw setup input. Names are trimmed; the goal must be a
    /// positive decimal integer.
    pub fn new(
        player1_name: &str,
        player2_name: &str,
        point_goal_text: &str,
    ) -> Result<Self, ValidationError> {
        let player1_name = player1_name.trim();
        let player2_name = player2_name.trim();

        if player1_name.is_empty() {
            return Err(ValidationError::EmptyName(Side::Left));
        }
        if player2_name.is_empty() {
            return Err(ValidationError::EmptyName(Side::Right));
        }

        let point_goal = rules::parse_point_goal(point_goal_text)?;

        Ok(Self {
            player1_name: player1_name.to_string(),
            player2_name: player2_name.to_string(),
            point_goal,
        })
    }

    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.player1_name,
            Side::Right => &self.player2_name,
        }
    }

    /// Score at which the sudden death indicator can appear
    pub fn sudden_death_threshold(&self) -> u32 {
        self.point_goal.saturating_sub(1)
    }
}

/// Scores and phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchState {
    pub player1_score: u32,
    pub player2_score: u32,
    pub phase: MatchPhase,
}

impl MatchState {
    /// Fresh (0, 0) scores with taps being counted
    pub fn started() -> Self {
        Self {
            player1_score: 0,
            player2_score: 0,
            phase: MatchPhase::InProgress,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.player1_score,
            Side::Right => self.player2_score,
        }
    }

    /// Add one point for `side`. Phase checks are the caller's job.
    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.player1_score = self.player1_score.saturating_add(1),
            Side::Right => self.player2_score = self.player2_score.saturating_add(1),
        }
    }

    pub fn margin(&self) -> u32 {
        self.player1_score.abs_diff(self.player2_score)
    }

    /// Side with the strictly higher score
    pub fn leader(&self) -> Option<Side> {
        match self.player1_score.cmp(&self.player2_score) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == MatchPhase::InProgress
    }
}

/// Outcome of the sudden death check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SuddenDeath {
    #[default]
    None,
    LeftIsLosing,
    RightIsLosing,
}

impl SuddenDeath {
    pub fn losing_side(&self) -> Option<Side> {
        match self {
            SuddenDeath::None => None,
            SuddenDeath::LeftIsLosing => Some(Side::Left),
            SuddenDeath::RightIsLosing => Some(Side::Right),
        }
    }

    /// Frame the indicator is drawn over: the side that is NOT losing.
    pub fn indicator_side(&self) -> Option<Side> {
        self.losing_side().map(Side::opposite)
    }
}

/// A finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Side,
    pub winner_name: String,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_score: u32,
    pub player2_score: u32,
}

/// Answer to the game over prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverChoice {
    /// Same players and goal, scores back to zero
    Rematch,
    /// Back to setup
    NewGame,
}

/// The whole value transformed by [`super::handle_event`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub variant: Variant,
    /// Present exactly when the phase is not `Setup`
    pub config: Option<MatchConfig>,
    pub state: MatchState,
}

impl Session {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            config: None,
            state: MatchState::default(),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_trims_names() {
        let config = MatchConfig::new("  Ann ", "Bob\n", " 11 ").unwrap();
        assert_eq!(config.player1_name, "Ann");
        assert_eq!(config.player2_name, "Bob");
        assert_eq!(config.point_goal, 11);
        assert_eq!(config.name(Side::Right), "Bob");
    }

    #[test]
    fn test_config_rejects_blank_names() {
        assert_eq!(
            MatchConfig::new("", "Bob", "5"),
            Err(ValidationError::EmptyName(Side::Left))
        );
        assert_eq!(
            MatchConfig::new("Ann", "   ", "5"),
            Err(ValidationError::EmptyName(Side::Right))
        );
    }

    #[test]
    fn test_increment_only_touches_one_side() {
        let mut state = MatchState::started();
        state.increment(Side::Right);
        state.increment(Side::Right);
        state.increment(Side::Left);
        assert_eq!((state.player1_score, state.player2_score), (1, 2));
        assert_eq!(state.leader(), Some(Side::Right));
        assert_eq!(state.margin(), 1);
    }

    #[test]
    fn test_indicator_sits_over_the_leader() {
        assert_eq!(SuddenDeath::RightIsLosing.indicator_side(), Some(Side::Left));
        assert_eq!(SuddenDeath::LeftIsLosing.indicator_side(), Some(Side::Right));
        assert_eq!(SuddenDeath::None.indicator_side(), None);
    }

    #[test]
    fn test_threshold_never_underflows() {
        let config = MatchConfig::new("Ann", "Bob", "1").unwrap();
        assert_eq!(config.sudden_death_threshold(), 0);
    }
}

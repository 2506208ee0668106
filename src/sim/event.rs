//! Event dispatch
//!
//! Every input (setup submission, tap, game over answer) goes through
//! [`handle_event`], which returns the next session and the effects a
//! display surface or storage sink has to act on.

use super::rules::{evaluate_sudden_death, evaluate_winner};
use super::state::{
    GameOverChoice, GameResult, MatchConfig, MatchPhase, MatchState, Session, Side, SuddenDeath,
};
use crate::error::ValidationError;

/// A single input from the display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// Setup form submitted (raw text, validated here)
    Configure {
        player1_name: String,
        player2_name: String,
        point_goal: String,
    },
    /// One half of the screen was tapped
    Tap(Side),
    /// Game over prompt answered
    Resolve(GameOverChoice),
}

impl MatchEvent {
    pub fn configure(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        point_goal: impl Into<String>,
    ) -> Self {
        Self::Configure {
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            point_goal: point_goal.into(),
        }
    }
}

/// Observable consequence of an event, in the order it should be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A match was set up with these players
    Configured(MatchConfig),
    /// Score labels need redrawing
    ScoresChanged { left: u32, right: u32 },
    /// Sudden death indicator state (sudden death variant only)
    SuddenDeath(SuddenDeath),
    /// The game just ended; record it and ask for a rematch
    GameOver(GameResult),
    /// Return to the setup form
    ShowSetup,
}

/// Pure transition: `session` is left untouched.
pub fn handle_event(
    session: &Session,
    event: &MatchEvent,
) -> Result<(Session, Vec<Effect>), ValidationError> {
    let mut next = session.clone();
    let effects = apply(&mut next, event)?;
    Ok((next, effects))
}

/// In-place transition. On a validation error the session is unchanged.
pub fn apply(session: &mut Session, event: &MatchEvent) -> Result<Vec<Effect>, ValidationError> {
    let mut effects = Vec::new();

    match event {
        MatchEvent::Configure {
            player1_name,
            player2_name,
            point_goal,
        } => {
            if session.phase() != MatchPhase::Setup {
                log::warn!("Setup submitted during {:?}, ignoring", session.phase());
                return Ok(effects);
            }

            let config = MatchConfig::new(player1_name, player2_name, point_goal)?;
            log::info!(
                "Match configured: {} vs {} to {}",
                config.player1_name,
                config.player2_name,
                config.point_goal
            );

            session.state = MatchState::started();
            effects.push(Effect::Configured(config.clone()));
            session.config = Some(config);
            push_scores(session, &mut effects);
        }
        MatchEvent::Tap(side) => {
            let Some(config) = session.config.as_ref() else {
                log::debug!("Tap on {} before setup, ignoring", side.as_str());
                return Ok(effects);
            };
            if !session.state.is_in_progress() {
                log::debug!("Tap on {} while {:?}, ignoring", side.as_str(), session.phase());
                return Ok(effects);
            }

            session.state.increment(*side);
            log::debug!(
                "Tap {}: {}-{}",
                side.as_str(),
                session.state.player1_score,
                session.state.player2_score
            );

            let winner = evaluate_winner(config, &session.state);
            let result = winner.map(|winner| GameResult {
                winner,
                winner_name: config.name(winner).to_string(),
                player1_name: config.player1_name.clone(),
                player2_name: config.player2_name.clone(),
                player1_score: session.state.player1_score,
                player2_score: session.state.player2_score,
            });

            push_scores(session, &mut effects);

            if let Some(result) = result {
                log::info!(
                    "{} wins {}-{}",
                    result.winner_name,
                    result.player1_score,
                    result.player2_score
                );
                session.state.phase = MatchPhase::Finished;
                effects.push(Effect::GameOver(result));
            }
        }
        MatchEvent::Resolve(choice) => {
            if session.phase() != MatchPhase::Finished {
                log::warn!("{choice:?} chosen during {:?}, ignoring", session.phase());
                return Ok(effects);
            }

            match choice {
                GameOverChoice::Rematch => {
                    session.state = MatchState::started();
                    push_scores(session, &mut effects);
                }
                GameOverChoice::NewGame => {
                    session.config = None;
                    session.state = MatchState::default();
                    effects.push(Effect::ShowSetup);
                }
            }
        }
    }

    Ok(effects)
}

/// Score redraw plus, when the variant wants it, the indicator refresh
fn push_scores(session: &Session, effects: &mut Vec<Effect>) {
    effects.push(Effect::ScoresChanged {
        left: session.state.player1_score,
        right: session.state.player2_score,
    });

    if session.variant.shows_sudden_death() {
        let indicator = session
            .config
            .as_ref()
            .map(|config| evaluate_sudden_death(config, &session.state))
            .unwrap_or_default();
        effects.push(Effect::SuddenDeath(indicator));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use proptest::prelude::*;

    fn started(variant: Variant, goal: &str) -> Session {
        let (session, _) = handle_event(
            &Session::new(variant),
            &MatchEvent::configure("Ann", "Bob", goal),
        )
        .unwrap();
        session
    }

    fn tap_n(session: &mut Session, side: Side, n: u32) {
        for _ in 0..n {
            apply(session, &MatchEvent::Tap(side)).unwrap();
        }
    }

    #[test]
    fn test_configure_starts_match() {
        let session = Session::new(Variant::Classic);
        let (next, effects) =
            handle_event(&session, &MatchEvent::configure("Ann", "Bob", "5")).unwrap();

        assert_eq!(next.phase(), MatchPhase::InProgress);
        assert_eq!(next.state.player1_score, 0);
        assert_eq!(next.state.player2_score, 0);
        assert_eq!(next.config.as_ref().unwrap().point_goal, 5);
        assert!(matches!(effects[0], Effect::Configured(_)));
        assert_eq!(effects[1], Effect::ScoresChanged { left: 0, right: 0 });
        assert_eq!(effects.len(), 2);

        // Input session untouched
        assert_eq!(session.phase(), MatchPhase::Setup);
    }

    #[test]
    fn test_configure_rejects_bad_input() {
        let session = Session::new(Variant::Classic);
        assert_eq!(
            handle_event(&session, &MatchEvent::configure("", "Bob", "5")),
            Err(ValidationError::EmptyName(Side::Left))
        );
        assert_eq!(
            handle_event(&session, &MatchEvent::configure("Ann", "Bob", "abc")),
            Err(ValidationError::InvalidGoal("abc".into()))
        );
    }

    #[test]
    fn test_configure_ignored_mid_match() {
        let mut session = started(Variant::Classic, "5");
        tap_n(&mut session, Side::Left, 2);

        let effects = apply(&mut session, &MatchEvent::configure("Cat", "Dan", "9")).unwrap();
        assert!(effects.is_empty());
        assert_eq!(session.config.as_ref().unwrap().player1_name, "Ann");
        assert_eq!(session.state.player1_score, 2);
    }

    #[test]
    fn test_tap_increments_mapped_side() {
        let mut session = started(Variant::Classic, "5");
        let effects = apply(&mut session, &MatchEvent::Tap(Side::Right)).unwrap();

        assert_eq!(session.state.player1_score, 0);
        assert_eq!(session.state.player2_score, 1);
        assert_eq!(effects, vec![Effect::ScoresChanged { left: 0, right: 1 }]);
    }

    #[test]
    fn test_tap_before_setup_is_ignored() {
        let mut session = Session::new(Variant::Classic);
        let effects = apply(&mut session, &MatchEvent::Tap(Side::Left)).unwrap();
        assert!(effects.is_empty());
        assert_eq!(session.state, MatchState::default());
    }

    #[test]
    fn test_win_detection() {
        let mut session = started(Variant::Classic, "5");
        tap_n(&mut session, Side::Left, 4);
        tap_n(&mut session, Side::Right, 3);

        let effects = apply(&mut session, &MatchEvent::Tap(Side::Left)).unwrap();
        assert_eq!(session.phase(), MatchPhase::Finished);

        let Some(Effect::GameOver(result)) = effects.last() else {
            panic!("expected game over, got {effects:?}");
        };
        assert_eq!(result.winner, Side::Left);
        assert_eq!(result.winner_name, "Ann");
        assert_eq!((result.player1_score, result.player2_score), (5, 3));
    }

    #[test]
    fn test_win_by_two_enforced() {
        let mut session = started(Variant::Classic, "5");
        tap_n(&mut session, Side::Left, 4);
        tap_n(&mut session, Side::Right, 4);

        let effects = apply(&mut session, &MatchEvent::Tap(Side::Left)).unwrap();
        assert_eq!(session.phase(), MatchPhase::InProgress);
        assert!(!effects.iter().any(|e| matches!(e, Effect::GameOver(_))));
    }

    #[test]
    fn test_taps_blocked_until_resolved() {
        let mut session = started(Variant::Classic, "1");
        tap_n(&mut session, Side::Right, 2);
        assert_eq!(session.phase(), MatchPhase::Finished);

        let effects = apply(&mut session, &MatchEvent::Tap(Side::Left)).unwrap();
        assert!(effects.is_empty());
        assert_eq!(session.state.player1_score, 0);
    }

    #[test]
    fn test_rematch_keeps_config() {
        let mut session = started(Variant::Classic, "3");
        tap_n(&mut session, Side::Left, 3);
        assert_eq!(session.phase(), MatchPhase::Finished);

        let effects =
            apply(&mut session, &MatchEvent::Resolve(GameOverChoice::Rematch)).unwrap();
        assert_eq!(session.state, MatchState::started());
        assert_eq!(session.config.as_ref().unwrap().player2_name, "Bob");
        assert_eq!(effects, vec![Effect::ScoresChanged { left: 0, right: 0 }]);
    }

    #[test]
    fn test_new_game_clears_config() {
        let mut session = started(Variant::Classic, "3");
        tap_n(&mut session, Side::Left, 3);

        let effects =
            apply(&mut session, &MatchEvent::Resolve(GameOverChoice::NewGame)).unwrap();
        assert_eq!(session.phase(), MatchPhase::Setup);
        assert!(session.config.is_none());
        assert_eq!(effects, vec![Effect::ShowSetup]);

        // Fresh configure is accepted again
        apply(&mut session, &MatchEvent::configure("Cat", "Dan", "7")).unwrap();
        assert_eq!(session.phase(), MatchPhase::InProgress);
    }

    #[test]
    fn test_resolve_ignored_mid_match() {
        let mut session = started(Variant::Classic, "5");
        tap_n(&mut session, Side::Left, 2);

        let effects =
            apply(&mut session, &MatchEvent::Resolve(GameOverChoice::NewGame)).unwrap();
        assert!(effects.is_empty());
        assert_eq!(session.state.player1_score, 2);
    }

    #[test]
    fn test_sudden_death_effects() {
        let mut session = started(Variant::SuddenDeath, "5");
        tap_n(&mut session, Side::Left, 3);
        tap_n(&mut session, Side::Right, 3);

        let effects = apply(&mut session, &MatchEvent::Tap(Side::Left)).unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::ScoresChanged { left: 4, right: 3 },
                Effect::SuddenDeath(SuddenDeath::RightIsLosing),
            ]
        );

        let effects = apply(&mut session, &MatchEvent::Tap(Side::Right)).unwrap();
        assert_eq!(effects[1], Effect::SuddenDeath(SuddenDeath::None));
    }

    #[test]
    fn test_classic_variant_has_no_indicator() {
        let mut session = started(Variant::Classic, "2");
        let effects = apply(&mut session, &MatchEvent::Tap(Side::Left)).unwrap();
        assert!(!effects.iter().any(|e| matches!(e, Effect::SuddenDeath(_))));
    }

    #[test]
    fn test_rematch_clears_indicator() {
        let mut session = started(Variant::SuddenDeath, "2");
        tap_n(&mut session, Side::Left, 2);
        assert_eq!(session.phase(), MatchPhase::Finished);

        let effects =
            apply(&mut session, &MatchEvent::Resolve(GameOverChoice::Rematch)).unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::ScoresChanged { left: 0, right: 0 },
                Effect::SuddenDeath(SuddenDeath::None),
            ]
        );
    }

    fn side_strategy() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::Left), Just(Side::Right)]
    }

    proptest! {
        #[test]
        fn prop_tap_sequence_keeps_invariants(
            goal in 1u32..8,
            taps in prop::collection::vec(side_strategy(), 0..40),
        ) {
            let mut session = started(Variant::SuddenDeath, &goal.to_string());

            for side in taps {
                let before = session.state;
                apply(&mut session, &MatchEvent::Tap(side)).unwrap();
                let after = session.state;

                // Scores never go down
                prop_assert!(after.player1_score >= before.player1_score);
                prop_assert!(after.player2_score >= before.player2_score);

                if before.phase == MatchPhase::InProgress {
                    prop_assert_eq!(after.score(side), before.score(side) + 1);
                    prop_assert_eq!(after.score(side.opposite()), before.score(side.opposite()));
                } else {
                    prop_assert_eq!(after, before);
                }

                if after.phase == MatchPhase::Finished {
                    let winner = after.leader().unwrap();
                    prop_assert!(after.score(winner) >= goal);
                    prop_assert!(after.margin() >= 2);
                } else {
                    let config = session.config.as_ref().unwrap();
                    prop_assert_eq!(evaluate_winner(config, &after), None);
                }
            }
        }
    }
}

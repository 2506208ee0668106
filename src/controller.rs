//! Match controller
//!
//! Owns the [`Session`] and wires the pure transitions in `sim` to the
//! collaborators that have side effects: the persistence sink and the
//! name registry. Display surfaces only ever see the returned effects.

use crate::error::Result;
use crate::history::{HistoryLog, HistoryRecord};
use crate::names::NameRegistry;
use crate::persistence::PersistenceSink;
use crate::platform::{Clock, SystemClock};
use crate::settings::Variant;
use crate::sim::{
    self, Effect, GameOverChoice, GameResult, MatchConfig, MatchEvent, MatchPhase, MatchState,
    Session, Side, SuddenDeath,
};

pub struct MatchController<S, C = SystemClock> {
    session: Session,
    sink: S,
    clock: C,
    /// Known names (stays empty for the classic variant)
    registry: NameRegistry,
    /// Most recent finished game, kept until the next one
    last_result: Option<GameResult>,
}

impl<S: PersistenceSink> MatchController<S, SystemClock> {
    pub fn new(variant: Variant, sink: S) -> Result<Self> {
        Self::with_clock(variant, sink, SystemClock)
    }
}

impl<S: PersistenceSink, C: Clock> MatchController<S, C> {
    /// Build a controller, loading remembered names when the variant uses them
    pub fn with_clock(variant: Variant, sink: S, clock: C) -> Result<Self> {
        let registry = if variant.tracks_names() {
            let registry = sink.load_names()?;
            log::info!("Loaded {} remembered names", registry.len());
            registry
        } else {
            NameRegistry::new()
        };

        Ok(Self {
            session: Session::new(variant),
            sink,
            clock,
            registry,
            last_result: None,
        })
    }

    /// Run one event through the state machine and apply its storage side
    /// effects. The returned effects are for the display surface.
    ///
    /// The session only advances once storage succeeded, so after an error
    /// the same event can be sent again.
    pub fn handle(&mut self, event: MatchEvent) -> Result<Vec<Effect>> {
        let (next, effects) = sim::handle_event(&self.session, &event)?;

        for effect in &effects {
            match effect {
                Effect::Configured(config) => self.remember_players(config)?,
                Effect::GameOver(result) => self.record_game(result)?,
                _ => {}
            }
        }

        self.session = next;
        Ok(effects)
    }

    /// Validate setup input and start a match. Outside of setup the current
    /// config is returned untouched.
    pub fn configure(
        &mut self,
        player1_name: &str,
        player2_name: &str,
        point_goal: &str,
    ) -> Result<MatchConfig> {
        let effects = self.handle(MatchEvent::configure(player1_name, player2_name, point_goal))?;
        let configured = effects.into_iter().find_map(|effect| match effect {
            Effect::Configured(config) => Some(config),
            _ => None,
        });
        // Ignored outside setup: hand back the match in progress
        match configured.or_else(|| self.session.config.clone()) {
            Some(config) => Ok(config),
            // Unreachable: setup yields a config or a validation error
            None => Ok(MatchConfig::new(player1_name, player2_name, point_goal)?),
        }
    }

    /// Count a tap on `side`. Ignored unless a match is in progress.
    pub fn register_tap(&mut self, side: Side) -> Result<MatchState> {
        self.handle(MatchEvent::Tap(side))?;
        Ok(self.session.state)
    }

    /// Answer the game over prompt
    pub fn resolve_game_over(&mut self, choice: GameOverChoice) -> Result<MatchState> {
        self.handle(MatchEvent::Resolve(choice))?;
        Ok(self.session.state)
    }

    /// Indicator for the current scores; always `None` for the classic variant
    pub fn evaluate_sudden_death(&self) -> SuddenDeath {
        match &self.session.config {
            Some(config) if self.session.variant.shows_sudden_death() => {
                sim::evaluate_sudden_death(config, &self.session.state)
            }
            _ => SuddenDeath::None,
        }
    }

    /// The result the current scores amount to, if someone has won
    pub fn evaluate_winner(&self) -> Option<GameResult> {
        let config = self.session.config.as_ref()?;
        let state = &self.session.state;
        let winner = sim::evaluate_winner(config, state)?;

        Some(GameResult {
            winner,
            winner_name: config.name(winner).to_string(),
            player1_name: config.player1_name.clone(),
            player2_name: config.player2_name.clone(),
            player1_score: state.player1_score,
            player2_score: state.player2_score,
        })
    }

    /// Everything stored so far
    pub fn history(&self) -> Result<HistoryLog> {
        Ok(HistoryLog::new(self.sink.load_history()?))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> MatchState {
        self.session.state
    }

    pub fn config(&self) -> Option<&MatchConfig> {
        self.session.config.as_ref()
    }

    pub fn phase(&self) -> MatchPhase {
        self.session.phase()
    }

    pub fn variant(&self) -> Variant {
        self.session.variant
    }

    pub fn names(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn remember_players(&mut self, config: &MatchConfig) -> Result<()> {
        if !self.session.variant.tracks_names() {
            return Ok(());
        }

        // A name joins the registry only once it is stored
        for side in Side::BOTH {
            let name = config.name(side);
            if !self.registry.contains(name) {
                self.sink.append_name(name)?;
                self.registry.insert(name);
            }
        }
        Ok(())
    }

    fn record_game(&mut self, result: &GameResult) -> Result<()> {
        let record = HistoryRecord::from_result(result, self.clock.today());
        self.sink.append_history(&record)?;
        self.last_result = Some(result.clone());
        Ok(())
    }
}

//! Display surface abstraction
//!
//! The controller never touches a screen. Front-ends implement
//! [`DisplaySurface`] and feed it effects through [`render`].

use std::io::Write;

use crate::error::ValidationError;
use crate::history::HistoryLog;
use crate::names::NameRegistry;
use crate::sim::{Effect, GameResult, MatchConfig, Side};

/// Anything that can show a match: DOM, terminal, test recorder
pub trait DisplaySurface {
    /// Show the setup form, offering remembered names
    fn show_setup(&mut self, known_names: &[String]);

    /// Switch to the split screen for a configured match
    fn show_match(&mut self, config: &MatchConfig);

    fn show_scores(&mut self, left: u32, right: u32);

    /// Show the indicator over `indicator`, clearing the other side
    fn show_sudden_death(&mut self, indicator: Option<Side>);

    fn show_validation_error(&mut self, error: &ValidationError);

    /// Announce the winner and ask for rematch or new game
    fn prompt_game_over(&mut self, result: &GameResult);
}

/// Apply effects to a surface in order
pub fn render<D: DisplaySurface + ?Sized>(surface: &mut D, effects: &[Effect], known_names: &[String]) {
    for effect in effects {
        match effect {
            Effect::Configured(config) => surface.show_match(config),
            Effect::ScoresChanged { left, right } => surface.show_scores(*left, *right),
            Effect::SuddenDeath(sudden_death) => {
                surface.show_sudden_death(sudden_death.indicator_side())
            }
            Effect::GameOver(result) => surface.prompt_game_over(result),
            Effect::ShowSetup => surface.show_setup(known_names),
        }
    }
}

/// Text of the game over prompt
pub fn game_over_message(result: &GameResult) -> String {
    format!(
        "{} wins! Would you like a rematch?\nChoose 'No' to create a new game.",
        result.winner_name
    )
}

/// History view: per-player totals, then the `recent` newest matches
pub fn history_lines(log: &HistoryLog, recent: usize) -> Vec<String> {
    if log.is_empty() {
        return vec!["No matches recorded yet.".to_string()];
    }

    let mut lines: Vec<String> = log
        .summary()
        .into_iter()
        .map(|entry| format!("{:<20} played {:>3}  won {:>3}", entry.name, entry.played, entry.won))
        .collect();
    lines.push("Recent:".to_string());
    lines.extend(log.recent(recent).map(|record| {
        format!(
            "  {} {} - {} {} ({})",
            record.player1_name,
            record.player1_score,
            record.player2_score,
            record.player2_name,
            record.date
        )
    }));
    lines
}

/// Names to offer for a partly typed name; everything when nothing is typed
pub fn name_suggestions(registry: &NameRegistry, typed: &str) -> Vec<String> {
    registry.suggestions(typed).map(str::to_string).collect()
}

/// Plain text surface for the native front-end
pub struct TerminalSurface<W: Write> {
    out: W,
    names: Option<(String, String)>,
    scores: (u32, u32),
    indicator: Option<Side>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            names: None,
            scores: (0, 0),
            indicator: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            log::warn!("Terminal write failed: {err}");
        }
    }

    /// Current scoreboard, `*` marking the sudden death indicator
    fn scoreboard(&self) -> String {
        let (left_name, right_name) = match &self.names {
            Some((left, right)) => (left.as_str(), right.as_str()),
            None => ("Player 1", "Player 2"),
        };
        let mark = |side| if self.indicator == Some(side) { "*" } else { " " };

        format!(
            "{}{} {:>3} | {:<3} {}{}",
            mark(Side::Left),
            left_name,
            self.scores.0,
            self.scores.1,
            right_name,
            mark(Side::Right)
        )
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn show_setup(&mut self, known_names: &[String]) {
        self.names = None;
        self.indicator = None;
        self.line("=== New game ===");
        if !known_names.is_empty() {
            self.line(&format!("Known players: {}", known_names.join(", ")));
        }
    }

    fn show_match(&mut self, config: &MatchConfig) {
        self.names = Some((config.player1_name.clone(), config.player2_name.clone()));
        self.line(&format!(
            "{} (left: a/l/1) vs {} (right: d/r/2), first to {} by two",
            config.player1_name, config.player2_name, config.point_goal
        ));
    }

    fn show_scores(&mut self, left: u32, right: u32) {
        self.scores = (left, right);
        let board = self.scoreboard();
        self.line(&board);
    }

    fn show_sudden_death(&mut self, indicator: Option<Side>) {
        if self.indicator != indicator {
            self.indicator = indicator;
            if indicator.is_some() {
                let board = self.scoreboard();
                self.line(&format!("Sudden death! {board}"));
            }
        }
    }

    fn show_validation_error(&mut self, error: &ValidationError) {
        self.line(&format!("Error: {error}"));
    }

    fn prompt_game_over(&mut self, result: &GameResult) {
        self.line(&format!(
            "Game over: {} - {}",
            result.player1_score, result.player2_score
        ));
        self.line(&game_over_message(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryRecord;
    use crate::sim::SuddenDeath;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DisplaySurface for Recorder {
        fn show_setup(&mut self, known_names: &[String]) {
            self.calls.push(format!("setup {}", known_names.len()));
        }
        fn show_match(&mut self, config: &MatchConfig) {
            self.calls.push(format!("match {}", config.point_goal));
        }
        fn show_scores(&mut self, left: u32, right: u32) {
            self.calls.push(format!("scores {left}-{right}"));
        }
        fn show_sudden_death(&mut self, indicator: Option<Side>) {
            self.calls.push(format!("indicator {indicator:?}"));
        }
        fn show_validation_error(&mut self, error: &ValidationError) {
            self.calls.push(format!("error {error}"));
        }
        fn prompt_game_over(&mut self, result: &GameResult) {
            self.calls.push(format!("over {}", result.winner_name));
        }
    }

    fn result() -> GameResult {
        GameResult {
            winner: Side::Left,
            winner_name: "Ann".into(),
            player1_name: "Ann".into(),
            player2_name: "Bob".into(),
            player1_score: 5,
            player2_score: 3,
        }
    }

    #[test]
    fn test_render_in_order() {
        let mut surface = Recorder::default();
        let effects = vec![
            Effect::ScoresChanged { left: 5, right: 3 },
            Effect::SuddenDeath(SuddenDeath::RightIsLosing),
            Effect::GameOver(result()),
            Effect::ShowSetup,
        ];
        render(&mut surface, &effects, &["Ann".to_string()]);

        assert_eq!(
            surface.calls,
            vec![
                "scores 5-3",
                "indicator Some(Left)",
                "over Ann",
                "setup 1",
            ]
        );
    }

    #[test]
    fn test_terminal_scoreboard() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_match(&MatchConfig::new("Ann", "Bob", "5").unwrap());
        surface.show_scores(4, 3);
        surface.show_sudden_death(Some(Side::Left));
        surface.show_sudden_death(Some(Side::Left));

        let text = String::from_utf8(surface.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], " Ann   4 | 3   Bob ");
        assert_eq!(lines[2], "Sudden death! *Ann   4 | 3   Bob ");
    }

    #[test]
    fn test_game_over_message() {
        assert!(game_over_message(&result()).starts_with("Ann wins!"));
    }

    #[test]
    fn test_history_lines() {
        assert_eq!(
            history_lines(&HistoryLog::default(), 5),
            vec!["No matches recorded yet."]
        );

        let record = |p2: &str, s1, s2| HistoryRecord {
            player1_name: "Ann".into(),
            player2_name: p2.into(),
            player1_score: s1,
            player2_score: s2,
            date: "101826".into(),
        };
        let log = HistoryLog::new(vec![record("Bob", 5, 3), record("Cat", 2, 4)]);
        let lines = history_lines(&log, 1);

        assert!(lines[0].starts_with("Ann"));
        assert!(lines[0].ends_with("played   2  won   1"));
        assert_eq!(lines[3], "Recent:");
        assert_eq!(lines[4], "  Ann 2 - 4 Cat (101826)");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_name_suggestions() {
        let registry = NameRegistry::from_names(["Ann", "andy", "Bob"]);
        assert_eq!(name_suggestions(&registry, "AN"), vec!["Ann", "andy"]);
        assert_eq!(name_suggestions(&registry, "").len(), 3);
        assert!(name_suggestions(&registry, "z").is_empty());
    }
}

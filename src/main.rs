//! Scorekeeper entry point
//!
//! Handles platform-specific initialization and runs the input loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Event, HtmlInputElement};

    use scorekeeper::persistence::{LocalStorageSink, MemorySink, PersistenceSink};
    use scorekeeper::sim::{Effect, GameOverChoice, GameResult, MatchConfig, MatchEvent, Side};
    use scorekeeper::ui::{self, DisplaySurface};
    use scorekeeper::{Error, MatchController, Settings, ValidationError, Variant};

    type Controller = MatchController<Box<dyn PersistenceSink>>;

    /// Show or hide an element by id
    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Replace the options of the name autocomplete list
    fn fill_known_names(document: &Document, names: &[String]) {
        let Some(list) = document.get_element_by_id("known-names") else {
            return;
        };
        list.set_inner_html("");
        for name in names {
            if let Ok(option) = document.create_element("option") {
                let _ = option.set_attribute("value", name);
                let _ = list.append_child(&option);
            }
        }
    }

    /// The page: a setup form and a board split into two tap targets
    struct DomSurface {
        document: Document,
    }

    impl DisplaySurface for DomSurface {
        fn show_setup(&mut self, known_names: &[String]) {
            let doc = &self.document;
            set_hidden(doc, "board", true);
            set_hidden(doc, "game-over", true);
            set_hidden(doc, "setup", false);
            set_text(doc, "setup-error", "");
            fill_known_names(doc, known_names);
        }

        fn show_match(&mut self, config: &MatchConfig) {
            let doc = &self.document;
            set_text(doc, "left-name", &config.player1_name);
            set_text(doc, "right-name", &config.player2_name);
            set_hidden(doc, "setup", true);
            set_hidden(doc, "board", false);
        }

        fn show_scores(&mut self, left: u32, right: u32) {
            set_hidden(&self.document, "game-over", true);
            set_text(&self.document, "left-score", &left.to_string());
            set_text(&self.document, "right-score", &right.to_string());
        }

        fn show_sudden_death(&mut self, indicator: Option<Side>) {
            for side in Side::BOTH {
                let id = format!("{}-sudden", side.as_str());
                set_hidden(&self.document, &id, indicator != Some(side));
            }
        }

        fn show_validation_error(&mut self, error: &ValidationError) {
            set_text(&self.document, "setup-error", &error.to_string());
        }

        fn prompt_game_over(&mut self, result: &GameResult) {
            set_text(&self.document, "game-over-text", &format!("{} wins!", result.winner_name));
            set_hidden(&self.document, "game-over", false);
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        surface: DomSurface,
    }

    impl Game {
        fn dispatch(&mut self, event: MatchEvent) {
            let doc = self.surface.document.clone();
            match self.controller.handle(event) {
                Ok(effects) => {
                    set_hidden(&doc, "status", true);
                    ui::render(&mut self.surface, &effects, self.controller.names().names());
                    if let Some(Effect::GameOver(result)) = effects.last() {
                        let choice = ask_rematch(result);
                        self.dispatch(MatchEvent::Resolve(choice));
                    }
                }
                Err(Error::Validation(err)) => self.surface.show_validation_error(&err),
                Err(Error::Persistence(err)) => {
                    // The match did not advance, so the same click can be retried
                    log::error!("Storage failed: {err}");
                    set_text(&doc, "status", &format!("Could not save: {err}. Try again."));
                    set_hidden(&doc, "status", false);
                }
            }
        }

        /// Known names matching what is typed in a name field
        fn suggest(&self, typed: &str) {
            let found = ui::name_suggestions(self.controller.names(), typed);
            fill_known_names(&self.surface.document, &found);
        }

        /// Show or hide the per-player totals and recent matches
        fn toggle_history(&self) {
            let doc = &self.surface.document;
            let showing = doc
                .get_element_by_id("history")
                .is_some_and(|el| !el.class_list().contains("hidden"));
            if showing {
                set_hidden(doc, "history", true);
                return;
            }

            match self.controller.history() {
                Ok(log) => {
                    set_text(doc, "history", &ui::history_lines(&log, 10).join("\n"));
                    set_hidden(doc, "history", false);
                }
                Err(err) => {
                    log::error!("Could not load history: {err}");
                    set_text(doc, "status", &format!("Could not load history: {err}"));
                    set_hidden(doc, "status", false);
                }
            }
        }
    }

    /// Blocking rematch/new game question, like a message box
    fn ask_rematch(result: &GameResult) -> GameOverChoice {
        let rematch = web_sys::window()
            .and_then(|w| w.confirm_with_message(&ui::game_over_message(result)).ok())
            .unwrap_or(false);
        if rematch {
            GameOverChoice::Rematch
        } else {
            GameOverChoice::NewGame
        }
    }

    /// Controller over LocalStorage, or over memory when storage is unusable
    fn open_controller(variant: Variant) -> Result<Controller, Error> {
        let stored = LocalStorageSink::open()
            .map_err(Error::from)
            .and_then(|sink| Controller::new(variant, Box::new(sink)));

        stored.or_else(|err| {
            log::warn!("{err}, history will not be kept");
            Controller::new(variant, Box::new(MemorySink::new()))
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Scorekeeper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        set_hidden(&document, "loading", true);

        let settings = Settings::load();
        let controller = match open_controller(settings.variant) {
            Ok(controller) => controller,
            Err(err) => {
                log::error!("Scorekeeper unavailable: {err}");
                return;
            }
        };
        log::info!("Variant: {}", settings.variant.as_str());

        let mut surface = DomSurface {
            document: document.clone(),
        };
        surface.show_setup(controller.names().names());
        surface.show_sudden_death(None);

        let game = Rc::new(RefCell::new(Game {
            controller,
            surface,
        }));

        setup_start_button(&document, game.clone());
        setup_name_suggestions(&document, game.clone());
        setup_history_button(&document, game.clone());
        setup_tap_targets(&document, game);

        log::info!("Scorekeeper running!");
    }

    fn on_event(document: &Document, id: &str, kind: &str, handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id}, {kind} events ignored");
            return;
        };
        let mut handler = handler;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| handler());
        let _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut() + 'static) {
        on_event(document, id, "click", handler);
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let doc = document.clone();
        on_click(document, "start-button", move || {
            let event = MatchEvent::configure(
                input_value(&doc, "player1-name"),
                input_value(&doc, "player2-name"),
                input_value(&doc, "point-goal"),
            );
            game.borrow_mut().dispatch(event);
        });
    }

    fn setup_name_suggestions(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["player1-name", "player2-name"] {
            let doc = document.clone();
            let game = game.clone();
            on_event(document, id, "input", move || {
                game.borrow().suggest(&input_value(&doc, id));
            });
        }
    }

    fn setup_history_button(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "history-button", move || game.borrow().toggle_history());
    }

    fn setup_tap_targets(document: &Document, game: Rc<RefCell<Game>>) {
        for side in Side::BOTH {
            let game = game.clone();
            on_click(document, side.as_str(), move || {
                game.borrow_mut().dispatch(MatchEvent::Tap(side));
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::io::{self, BufRead, Write};

    use scorekeeper::persistence::FileSink;
    use scorekeeper::sim::{GameOverChoice, MatchEvent, MatchPhase, Side};
    use scorekeeper::ui::{self, DisplaySurface, TerminalSurface};
    use scorekeeper::{Error, MatchController, NameRegistry, Settings};

    /// A line typed during a match
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Command {
        Tap(Side),
        History,
        Help,
        Quit,
    }

    pub fn parse_command(line: &str) -> Option<Command> {
        match line.trim().to_lowercase().as_str() {
            "a" | "l" | "1" | "left" => Some(Command::Tap(Side::Left)),
            "d" | "r" | "2" | "right" => Some(Command::Tap(Side::Right)),
            "h" | "history" => Some(Command::History),
            "?" | "help" => Some(Command::Help),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn parse_choice(line: &str) -> Option<GameOverChoice> {
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" | "rematch" => Some(GameOverChoice::Rematch),
            "n" | "no" | "new" => Some(GameOverChoice::NewGame),
            _ => None,
        }
    }

    /// Print a prompt and read one line; None on end of input
    fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Option<String> {
        print!("{text}");
        let _ = io::stdout().flush();
        match lines.next()? {
            Ok(line) => Some(line),
            Err(err) => {
                log::warn!("Could not read input: {err}");
                None
            }
        }
    }

    fn print_history(controller: &MatchController<FileSink>) -> Result<(), Error> {
        for line in ui::history_lines(&controller.history()?, 5) {
            println!("{line}");
        }
        Ok(())
    }

    /// Typed text asking for name suggestions, e.g. `an?`
    pub fn suggestion_prefix(line: &str) -> Option<&str> {
        line.trim().strip_suffix('?')
    }

    /// Read a player name; a line ending in `?` lists matching known names
    fn prompt_name(
        lines: &mut impl Iterator<Item = io::Result<String>>,
        text: &str,
        names: &NameRegistry,
    ) -> Option<String> {
        loop {
            let line = prompt(lines, text)?;
            let Some(prefix) = suggestion_prefix(&line) else {
                return Some(line);
            };
            let found = ui::name_suggestions(names, prefix);
            if found.is_empty() {
                println!("No known names start with {prefix:?}");
            } else {
                println!("Known: {}", found.join(", "));
            }
        }
    }

    pub fn run() -> Result<(), Error> {
        let settings = Settings::load();
        log::info!("Variant: {}", settings.variant.as_str());

        let sink = FileSink::from_settings(&settings);
        let mut controller = MatchController::new(settings.variant, sink)?;
        let mut surface = TerminalSurface::new(io::stdout());

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        surface.show_setup(controller.names().names());

        loop {
            let event = match controller.phase() {
                MatchPhase::Setup => {
                    let names = controller.names();
                    let Some(player1) = prompt_name(&mut lines, "Player 1 name: ", names) else {
                        break;
                    };
                    let Some(player2) = prompt_name(&mut lines, "Player 2 name: ", names) else {
                        break;
                    };
                    let Some(goal) = prompt(&mut lines, "Point total to win: ") else {
                        break;
                    };
                    MatchEvent::configure(player1, player2, goal)
                }
                MatchPhase::InProgress => {
                    let Some(line) = prompt(&mut lines, "> ") else {
                        break;
                    };
                    match parse_command(&line) {
                        Some(Command::Tap(side)) => MatchEvent::Tap(side),
                        Some(Command::History) => {
                            print_history(&controller)?;
                            continue;
                        }
                        Some(Command::Quit) => break,
                        Some(Command::Help) | None => {
                            println!("a/l/1 = left, d/r/2 = right, h = history, q = quit");
                            continue;
                        }
                    }
                }
                MatchPhase::Finished => {
                    let Some(line) = prompt(&mut lines, "Rematch? [y/n]: ") else {
                        break;
                    };
                    match parse_choice(&line) {
                        Some(choice) => MatchEvent::Resolve(choice),
                        None => continue,
                    }
                }
            };

            match controller.handle(event) {
                Ok(effects) => ui::render(&mut surface, &effects, controller.names().names()),
                Err(Error::Validation(err)) => surface.show_validation_error(&err),
                Err(err) => return Err(err),
            }
        }

        log::info!("Scorekeeper exiting");
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), scorekeeper::Error> {
    env_logger::init();
    log::info!("Scorekeeper (native) starting...");
    native_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

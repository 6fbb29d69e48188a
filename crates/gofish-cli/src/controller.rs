use crate::store::SaveStore;
use gofish_core::model::player::Seat;
use gofish_core::{
    GameEngine, GameError, GameObserver, GameState, PlayerView, SharedGame, ShiftDirection,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{Level, event};

/// Opponent states are stepped through in bulk; this caps a single burst.
const AUTOPLAY_LIMIT: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Shift(ShiftDirection),
    Advance,
    NewGame,
    Save,
    ShowJson,
    Help,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Command> {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "n" | "next" => Some(Command::Advance),
            "a" | "h" | "left" => Some(Command::Shift(ShiftDirection::Left)),
            "d" | "l" | "right" => Some(Command::Shift(ShiftDirection::Right)),
            "new" | "r" | "reset" => Some(Command::NewGame),
            "s" | "save" => Some(Command::Save),
            "json" => Some(Command::ShowJson),
            "?" | "help" => Some(Command::Help),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Turns game transitions into one-line messages for the terminal.
struct Announcer {
    messages: Arc<Mutex<Vec<String>>>,
}

impl GameObserver for Announcer {
    fn on_transition(&mut self, from: GameState, to: GameState) {
        let message = match (from, to) {
            (GameState::MyStageToScore, _) => Some("You completed a set.".to_string()),
            (GameState::OtherStageToScore, _) => Some("Opponent completed a set.".to_string()),
            (GameState::MyTurn, GameState::MyDrawToExchange) => Some("Go fish!".to_string()),
            (GameState::OtherTurn, GameState::OtherDrawToExchange) => {
                Some("Opponent goes fishing.".to_string())
            }
            _ => None,
        };
        if let Some(message) = message {
            self.messages.lock().push(message);
        }
        if to.is_terminal() {
            self.messages.lock().push(format!("Game over: {to}"));
        }
    }
}

/// Drives a shared game from text commands and owns the save file.
pub struct GameController {
    game: SharedGame,
    store: SaveStore,
    autoplay_opponent: bool,
    messages: Arc<Mutex<Vec<String>>>,
}

impl GameController {
    pub fn new(engine: GameEngine, store: SaveStore, autoplay_opponent: bool) -> Self {
        let game = SharedGame::new(engine);
        let messages = Arc::new(Mutex::new(Vec::new()));
        game.subscribe(Box::new(Announcer {
            messages: Arc::clone(&messages),
        }));
        Self {
            game,
            store,
            autoplay_opponent,
            messages,
        }
    }

    /// Restores the save file if there is one. Any failure leaves a fresh game.
    pub fn resume(&self) -> bool {
        match self.store.read() {
            Ok(text) => self.game.load(&text),
            Err(GameError::SaveNotFound { path }) => {
                event!(
                    target: "gofish_cli::store",
                    Level::INFO,
                    path = %path.display(),
                    "no saved game; starting fresh"
                );
                false
            }
            Err(err) => {
                event!(
                    target: "gofish_cli::store",
                    Level::WARN,
                    error = %err,
                    "could not read saved game; starting fresh"
                );
                false
            }
        }
    }

    pub fn save(&self) -> Result<(), GameError> {
        self.store.write(&self.game.save())
    }

    pub fn view(&self) -> PlayerView {
        self.game.view()
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    pub fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Applies one command. Returns `false` once the player asked to quit.
    pub fn handle(&self, command: Command) -> bool {
        match command {
            Command::Shift(direction) => {
                self.game.shift(direction);
            }
            Command::Advance => {
                self.game.advance();
            }
            Command::NewGame => self.game.reset(),
            Command::Save => self.save_and_report(),
            Command::ShowJson | Command::Help => {}
            Command::Quit => return false,
        }
        self.autoplay();
        true
    }

    /// Advances while only the opponent has something to do.
    pub fn autoplay(&self) -> usize {
        if !self.autoplay_opponent {
            return 0;
        }
        let mut steps = 0;
        while steps < AUTOPLAY_LIMIT && self.game.state().mover() == Some(Seat::Opponent) {
            if !self.game.advance() {
                break;
            }
            steps += 1;
        }
        steps
    }

    fn save_and_report(&self) {
        let message = match self.save() {
            Ok(()) => format!("Saved to {}", self.store.path().display()),
            Err(err) => {
                event!(
                    target: "gofish_cli::store",
                    Level::WARN,
                    error = %err,
                    "save failed"
                );
                format!("Save failed: {err}")
            }
        };
        self.messages.lock().push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, GameController};
    use crate::store::SaveStore;
    use gofish_core::model::player::Seat;
    use gofish_core::{GameEngine, ShiftDirection};

    fn controller(dir: &tempfile::TempDir, autoplay: bool) -> GameController {
        let store = SaveStore::new(dir.path().join("gofish.txt"));
        GameController::new(GameEngine::with_seed(21), store, autoplay)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(""), Some(Command::Advance));
        assert_eq!(
            Command::parse(" A "),
            Some(Command::Shift(ShiftDirection::Left))
        );
        assert_eq!(
            Command::parse("right"),
            Some(Command::Shift(ShiftDirection::Right))
        );
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("fish"), None);
    }

    #[test]
    fn autoplay_never_stops_on_an_opponent_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let controller = controller(&dir, true);
        for _ in 0..2_000 {
            if controller.state().is_terminal() {
                break;
            }
            if !controller.handle(Command::Advance) {
                break;
            }
            assert_ne!(controller.state().mover(), Some(Seat::Opponent));
            if controller.state() == gofish_core::GameState::MyHandToStageShift {
                controller.handle(Command::Shift(ShiftDirection::Right));
            }
        }
        assert!(controller.state().is_terminal());
    }

    #[test]
    fn quit_stops_and_save_then_resume_restores() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = controller(&dir, false);
        first.handle(Command::Advance);
        assert!(first.handle(Command::Save));
        assert!(first.take_messages().iter().any(|m| m.starts_with("Saved to")));
        assert!(!first.handle(Command::Quit));

        let second = GameController::new(
            GameEngine::with_seed(99),
            SaveStore::new(dir.path().join("gofish.txt")),
            false,
        );
        assert!(second.resume());
        assert_eq!(second.view(), first.view());
    }

    #[test]
    fn resume_without_save_starts_fresh() {
        let dir = tempfile::tempdir().expect("temp dir");
        let controller = controller(&dir, true);
        assert!(!controller.resume());
        assert!(!controller.state().is_terminal());
    }
}

use super::engine::{GameEngine, ShiftDirection};
use super::state::GameState;
use super::view::PlayerView;
use parking_lot::Mutex;

/// Notified after every command that changed the state. Hosts hang audio,
/// animation or redraw hooks off this; the engine knows nothing about them.
pub trait GameObserver: Send {
    fn on_transition(&mut self, from: GameState, to: GameState);
}

struct Session {
    engine: GameEngine,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Session {
    fn apply<R>(&mut self, command: impl FnOnce(&mut GameEngine) -> R) -> R {
        let from = self.engine.state();
        let result = command(&mut self.engine);
        let to = self.engine.state();
        if from != to {
            for observer in self.observers.iter_mut() {
                observer.on_transition(from, to);
            }
        }
        result
    }
}

/// A [`GameEngine`] that can be driven from several threads. Every command
/// and every read takes the lock once, so a transition is never observed half
/// applied.
pub struct SharedGame {
    inner: Mutex<Session>,
}

impl SharedGame {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            inner: Mutex::new(Session {
                engine,
                observers: Vec::new(),
            }),
        }
    }

    pub fn subscribe(&self, observer: Box<dyn GameObserver>) {
        self.inner.lock().observers.push(observer);
    }

    pub fn shift(&self, direction: ShiftDirection) -> bool {
        self.inner.lock().apply(|engine| engine.shift(direction))
    }

    pub fn advance(&self) -> bool {
        self.inner.lock().apply(GameEngine::advance)
    }

    pub fn reset(&self) {
        self.inner.lock().apply(GameEngine::reset)
    }

    pub fn save(&self) -> String {
        self.inner.lock().engine.save()
    }

    pub fn load(&self, text: &str) -> bool {
        self.inner.lock().apply(|engine| engine.load(text))
    }

    pub fn state(&self) -> GameState {
        self.inner.lock().engine.state()
    }

    pub fn view(&self) -> PlayerView {
        self.inner.lock().engine.view()
    }

    /// Runs `f` against the engine under the lock. Observers are not notified.
    pub fn with_engine<R>(&self, f: impl FnOnce(&GameEngine) -> R) -> R {
        f(&self.inner.lock().engine)
    }
}

#![deny(warnings)]
pub mod belief;
pub mod error;
pub mod game;
pub mod model;
pub mod policy;

pub use error::GameError;
pub use game::engine::{GameEngine, ShiftDirection};
pub use game::session::{GameObserver, SharedGame};
pub use game::state::GameState;
pub use game::view::PlayerView;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "gofish"
    }

    pub const fn codename() -> &'static str {
        "Two Stage"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "gofish");
        assert_eq!(AppInfo::codename(), "Two Stage");
        assert!(!AppInfo::version().is_empty());
    }
}

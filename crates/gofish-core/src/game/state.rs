use crate::model::player::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Every point the table can rest at between two commands. The ordinal of
/// each variant is its persisted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Start,
    MyTurn,
    MyHandToStageShift,
    MyHandToStageOnly,
    MyStageToHand,
    MyStageToExchange,
    MyStageToScore,
    ExchangeToMyStage,
    OtherTurn,
    OtherHandToStage,
    OtherStageToHand,
    OtherStageToExchange,
    OtherStageToScore,
    ExchangeToOtherStage,
    MyDrawToExchange,
    OtherDrawToExchange,
    MyWin,
    OtherWin,
    Tie,
}

impl GameState {
    pub const ORDERED: [GameState; 19] = [
        GameState::Start,
        GameState::MyTurn,
        GameState::MyHandToStageShift,
        GameState::MyHandToStageOnly,
        GameState::MyStageToHand,
        GameState::MyStageToExchange,
        GameState::MyStageToScore,
        GameState::ExchangeToMyStage,
        GameState::OtherTurn,
        GameState::OtherHandToStage,
        GameState::OtherStageToHand,
        GameState::OtherStageToExchange,
        GameState::OtherStageToScore,
        GameState::ExchangeToOtherStage,
        GameState::MyDrawToExchange,
        GameState::OtherDrawToExchange,
        GameState::MyWin,
        GameState::OtherWin,
        GameState::Tie,
    ];

    pub const fn ordinal(self) -> usize {
        match self {
            GameState::Start => 0,
            GameState::MyTurn => 1,
            GameState::MyHandToStageShift => 2,
            GameState::MyHandToStageOnly => 3,
            GameState::MyStageToHand => 4,
            GameState::MyStageToExchange => 5,
            GameState::MyStageToScore => 6,
            GameState::ExchangeToMyStage => 7,
            GameState::OtherTurn => 8,
            GameState::OtherHandToStage => 9,
            GameState::OtherStageToHand => 10,
            GameState::OtherStageToExchange => 11,
            GameState::OtherStageToScore => 12,
            GameState::ExchangeToOtherStage => 13,
            GameState::MyDrawToExchange => 14,
            GameState::OtherDrawToExchange => 15,
            GameState::MyWin => 16,
            GameState::OtherWin => 17,
            GameState::Tie => 18,
        }
    }

    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        if ordinal < Self::ORDERED.len() {
            Some(Self::ORDERED[ordinal])
        } else {
            None
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::MyWin | GameState::OtherWin | GameState::Tie)
    }

    /// States in which the human moves the selection cursor.
    pub const fn accepts_shift(self) -> bool {
        matches!(self, GameState::MyTurn | GameState::MyHandToStageShift)
    }

    /// Seat whose cards the next `advance` moves. `None` for `Start` and the
    /// terminal states.
    pub const fn mover(self) -> Option<Seat> {
        match self {
            GameState::MyTurn
            | GameState::MyHandToStageShift
            | GameState::MyHandToStageOnly
            | GameState::MyStageToHand
            | GameState::MyStageToExchange
            | GameState::MyStageToScore
            | GameState::ExchangeToMyStage
            | GameState::MyDrawToExchange => Some(Seat::Human),
            GameState::OtherTurn
            | GameState::OtherHandToStage
            | GameState::OtherStageToHand
            | GameState::OtherStageToExchange
            | GameState::OtherStageToScore
            | GameState::ExchangeToOtherStage
            | GameState::OtherDrawToExchange => Some(Seat::Opponent),
            GameState::Start | GameState::MyWin | GameState::OtherWin | GameState::Tie => None,
        }
    }

    /// Winner once the game is over; `None` for a tie or a game in progress.
    pub const fn winner(self) -> Option<Seat> {
        match self {
            GameState::MyWin => Some(Seat::Human),
            GameState::OtherWin => Some(Seat::Opponent),
            _ => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::model::player::Seat;

    #[test]
    fn ordinals_follow_declaration_order() {
        assert_eq!(GameState::Start.ordinal(), 0);
        assert_eq!(GameState::OtherTurn.ordinal(), 8);
        assert_eq!(GameState::MyDrawToExchange.ordinal(), 14);
        assert_eq!(GameState::Tie.ordinal(), 18);
        for (i, state) in GameState::ORDERED.iter().enumerate() {
            assert_eq!(state.ordinal(), i);
            assert_eq!(GameState::from_ordinal(i), Some(*state));
        }
        assert_eq!(GameState::from_ordinal(19), None);
    }

    #[test]
    fn only_outcomes_are_terminal() {
        let terminal: Vec<_> = GameState::ORDERED
            .iter()
            .copied()
            .filter(|state| state.is_terminal())
            .collect();
        assert_eq!(
            terminal,
            vec![GameState::MyWin, GameState::OtherWin, GameState::Tie]
        );
        for state in terminal {
            assert_eq!(state.mover(), None);
            assert!(!state.accepts_shift());
        }
    }

    #[test]
    fn mover_splits_states_by_seat() {
        assert_eq!(GameState::ExchangeToMyStage.mover(), Some(Seat::Human));
        assert_eq!(GameState::ExchangeToOtherStage.mover(), Some(Seat::Opponent));
        assert_eq!(GameState::Start.mover(), None);
        assert_eq!(GameState::MyWin.winner(), Some(Seat::Human));
        assert_eq!(GameState::Tie.winner(), None);
    }
}

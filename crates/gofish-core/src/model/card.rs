use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense index in `0..52`, suit-major like the unshuffled deck.
    pub const fn index(self) -> usize {
        self.suit.index() * 13 + self.rank.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn display_is_rank_then_suit() {
        assert_eq!(Card::new(Rank::Queen, Suit::Spades).to_string(), "QS");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10H");
    }

    #[test]
    fn index_is_suit_major() {
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).index(), 0);
        assert_eq!(Card::new(Rank::King, Suit::Clubs).index(), 12);
        assert_eq!(Card::new(Rank::Ace, Suit::Diamonds).index(), 13);
        assert_eq!(Card::new(Rank::King, Suit::Spades).index(), 51);
    }
}

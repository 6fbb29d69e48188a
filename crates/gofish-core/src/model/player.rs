use core::fmt;
use serde::{Deserialize, Serialize};

/// The two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    Human = 0,
    Opponent = 1,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Human, Seat::Opponent];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::Human => Seat::Opponent,
            Seat::Opponent => Seat::Human,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::Human => "Human",
            Seat::Opponent => "Opponent",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Seat;

    #[test]
    fn other_swaps_seats() {
        assert_eq!(Seat::Human.other(), Seat::Opponent);
        assert_eq!(Seat::Opponent.other(), Seat::Human);
    }

    #[test]
    fn index_matches_order() {
        for (i, seat) in Seat::BOTH.iter().enumerate() {
            assert_eq!(seat.index(), i);
        }
    }
}

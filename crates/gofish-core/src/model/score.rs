use crate::model::group::{RankGroup, Visibility};
use crate::model::player::Seat;
use crate::model::rank::Rank;

/// Captured rank groups for both seats. A seat's score is the length of its pile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    piles: [Vec<RankGroup>; 2],
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_piles(piles: [Vec<RankGroup>; 2]) -> Self {
        Self { piles }
    }

    /// Appends a captured group. Score pile entries always show rank only.
    pub fn capture(&mut self, seat: Seat, mut group: RankGroup) {
        group.set_visibility(Visibility::RankOnly);
        self.piles[seat.index()].push(group);
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.piles[seat.index()].len() as u32
    }

    pub fn pile(&self, seat: Seat) -> &[RankGroup] {
        &self.piles[seat.index()]
    }

    pub fn total_captures(&self) -> u32 {
        self.score(Seat::Human) + self.score(Seat::Opponent)
    }

    pub fn is_captured(&self, rank: Rank) -> bool {
        self.piles
            .iter()
            .flatten()
            .any(|group| group.rank() == rank)
    }

    /// Seat with the strictly higher score, `None` on a tie.
    pub fn leading_seat(&self) -> Option<Seat> {
        let human = self.score(Seat::Human);
        let opponent = self.score(Seat::Opponent);
        match human.cmp(&opponent) {
            std::cmp::Ordering::Greater => Some(Seat::Human),
            std::cmp::Ordering::Less => Some(Seat::Opponent),
            std::cmp::Ordering::Equal => None,
        }
    }
}

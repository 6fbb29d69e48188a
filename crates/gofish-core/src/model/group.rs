use crate::model::card::Card;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// How much of a rank group the human is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    FaceUp,
    FaceDown,
    /// Only the rank is shown: ask markers, revealed groups, score piles.
    RankOnly,
    Hidden,
}

impl Visibility {
    pub const ORDERED: [Visibility; 4] = [
        Visibility::FaceUp,
        Visibility::FaceDown,
        Visibility::RankOnly,
        Visibility::Hidden,
    ];

    pub const fn ordinal(self) -> usize {
        match self {
            Visibility::FaceUp => 0,
            Visibility::FaceDown => 1,
            Visibility::RankOnly => 2,
            Visibility::Hidden => 3,
        }
    }

    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        if ordinal < Self::ORDERED.len() {
            Some(Self::ORDERED[ordinal])
        } else {
            None
        }
    }
}

/// Up to four cards of one rank, one slot per suit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroup {
    rank: Rank,
    slots: [Option<Card>; 4],
    visibility: Visibility,
}

impl RankGroup {
    pub const fn new(rank: Rank, visibility: Visibility) -> Self {
        Self {
            rank,
            slots: [None; 4],
            visibility,
        }
    }

    /// Empty hidden group, the resting state of stages and the exchange.
    pub const fn hidden() -> Self {
        Self::new(Rank::Ace, Visibility::Hidden)
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn set_rank(&mut self, rank: Rank) {
        self.rank = rank;
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    /// Places `card` in its suit slot and adopts its rank.
    pub fn add(&mut self, card: Card) {
        let slot = &mut self.slots[card.suit.index()];
        debug_assert!(slot.is_none(), "slot for {card} already occupied");
        *slot = Some(card);
        self.rank = card.rank;
    }

    /// Moves every card out of `from` into `self`. The rank follows the moved
    /// cards; an empty `from` leaves `self` untouched.
    ///
    /// Refuses, moving nothing, when both groups hold cards of different ranks
    /// or share a suit slot. Returns whether the cards moved.
    pub fn transfer(&mut self, from: &mut RankGroup) -> bool {
        if from.is_empty() {
            return true;
        }
        let clash = self
            .slots
            .iter()
            .zip(from.slots.iter())
            .any(|(slot, source)| slot.is_some() && source.is_some());
        if clash || (!self.is_empty() && self.rank != from.rank) {
            return false;
        }
        for (slot, source) in self.slots.iter_mut().zip(from.slots.iter_mut()) {
            if let Some(card) = source.take() {
                *slot = Some(card);
            }
        }
        self.rank = from.rank;
        true
    }

    /// Moves the cards out into a new group carrying the same rank and
    /// visibility, leaving `self` empty.
    pub fn take(&mut self) -> RankGroup {
        let mut taken = RankGroup::new(self.rank, self.visibility);
        taken.transfer(self);
        taken.rank = self.rank;
        taken
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<Card>; 4] {
        &self.slots
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().flatten().copied()
    }
}

impl Default for RankGroup {
    fn default() -> Self {
        Self::hidden()
    }
}

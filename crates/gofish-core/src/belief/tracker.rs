use crate::model::hand::Hand;
use crate::model::rank::{RANK_COUNT, Rank};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankBelief {
    DoesHave,
    DoesNotHave,
    MightHave,
    CannotHave,
}

impl RankBelief {
    pub const ORDERED: [RankBelief; 4] = [
        RankBelief::DoesHave,
        RankBelief::DoesNotHave,
        RankBelief::MightHave,
        RankBelief::CannotHave,
    ];

    pub const fn ordinal(self) -> usize {
        match self {
            RankBelief::DoesHave => 0,
            RankBelief::DoesNotHave => 1,
            RankBelief::MightHave => 2,
            RankBelief::CannotHave => 3,
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

/// Per-rank belief table indexed by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeTracker {
    beliefs: [RankBelief; RANK_COUNT],
}

impl KnowledgeTracker {
    pub fn new() -> Self {
        Self {
            beliefs: [RankBelief::MightHave; RANK_COUNT],
        }
    }

    /// Deal-time seeding: `CannotHave` wherever the human's group is hidden,
    /// `MightHave` elsewhere. This reads the human's hand directly, so the
    /// opponent starts with more than it could have observed.
    pub fn seeded_from(human: &Hand) -> Self {
        let mut tracker = Self::new();
        for group in human.groups() {
            if group.is_hidden() {
                tracker.beliefs[group.rank().index()] = RankBelief::CannotHave;
            }
        }
        tracker
    }

    pub(crate) fn from_beliefs(beliefs: [RankBelief; RANK_COUNT]) -> Self {
        Self { beliefs }
    }

    pub fn get(&self, rank: Rank) -> RankBelief {
        self.beliefs[rank.index()]
    }

    pub fn beliefs(&self) -> &[RankBelief; RANK_COUNT] {
        &self.beliefs
    }

    /// The human asked for `rank`, so they hold it.
    pub fn on_human_ask(&mut self, rank: Rank) {
        self.beliefs[rank.index()] = RankBelief::DoesHave;
    }

    /// The opponent asked for `rank`; until the human draws unseen cards they
    /// are assumed not to hold it.
    pub fn on_opponent_ask(&mut self, rank: Rank) {
        self.beliefs[rank.index()] = RankBelief::DoesNotHave;
    }

    pub fn on_capture(&mut self, rank: Rank) {
        self.beliefs[rank.index()] = RankBelief::CannotHave;
    }

    /// The human kept a face-down draw; every `DoesNotHave` may now be wrong.
    pub fn on_undisclosed_draw(&mut self) {
        for belief in self.beliefs.iter_mut() {
            if *belief == RankBelief::DoesNotHave {
                *belief = RankBelief::MightHave;
            }
        }
    }
}

impl Default for KnowledgeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{KnowledgeTracker, RankBelief};
    use crate::model::card::Card;
    use crate::model::group::Visibility;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn seeding_marks_hidden_ranks_as_cannot_have() {
        let mut hand = Hand::new();
        hand.receive(Card::new(Rank::Three, Suit::Clubs), Visibility::FaceUp);
        hand.receive(Card::new(Rank::Jack, Suit::Hearts), Visibility::FaceUp);
        let tracker = KnowledgeTracker::seeded_from(&hand);
        for rank in Rank::ORDERED {
            let expected = if matches!(rank, Rank::Three | Rank::Jack) {
                RankBelief::MightHave
            } else {
                RankBelief::CannotHave
            };
            assert_eq!(tracker.get(rank), expected, "{rank}");
        }
    }

    #[test]
    fn asks_set_beliefs_for_the_asked_rank() {
        let mut tracker = KnowledgeTracker::new();
        tracker.on_human_ask(Rank::Five);
        tracker.on_opponent_ask(Rank::Nine);
        assert_eq!(tracker.get(Rank::Five), RankBelief::DoesHave);
        assert_eq!(tracker.get(Rank::Nine), RankBelief::DoesNotHave);
        assert_eq!(tracker.get(Rank::Two), RankBelief::MightHave);
    }

    #[test]
    fn undisclosed_draw_only_relaxes_does_not_have() {
        let mut tracker = KnowledgeTracker::new();
        tracker.on_opponent_ask(Rank::Nine);
        tracker.on_opponent_ask(Rank::Ten);
        tracker.on_human_ask(Rank::Ace);
        tracker.on_capture(Rank::King);

        tracker.on_undisclosed_draw();

        assert_eq!(tracker.get(Rank::Nine), RankBelief::MightHave);
        assert_eq!(tracker.get(Rank::Ten), RankBelief::MightHave);
        assert_eq!(tracker.get(Rank::Ace), RankBelief::DoesHave);
        assert_eq!(tracker.get(Rank::King), RankBelief::CannotHave);
    }

    #[test]
    fn belief_ordinals_roundtrip() {
        for (i, belief) in RankBelief::ORDERED.iter().enumerate() {
            assert_eq!(belief.ordinal(), i);
            assert_eq!(RankBelief::from_ordinal(i), Some(*belief));
        }
        assert_eq!(RankBelief::from_ordinal(9), None);
    }
}

use crate::model::card::Card;
use crate::model::group::{RankGroup, Visibility};
use crate::model::rank::{RANK_COUNT, Rank};
use std::array;

/// Thirteen rank groups, indexed by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    groups: [RankGroup; RANK_COUNT],
}

impl Hand {
    /// Every group empty and hidden.
    pub fn new() -> Self {
        Self {
            groups: array::from_fn(|i| RankGroup::new(Rank::ORDERED[i], Visibility::Hidden)),
        }
    }

    pub fn group(&self, rank: Rank) -> &RankGroup {
        &self.groups[rank.index()]
    }

    pub fn group_mut(&mut self, rank: Rank) -> &mut RankGroup {
        &mut self.groups[rank.index()]
    }

    pub fn groups(&self) -> &[RankGroup; RANK_COUNT] {
        &self.groups
    }

    /// Adds a dealt card and shows its group with `visibility`.
    pub fn receive(&mut self, card: Card, visibility: Visibility) {
        let group = self.group_mut(card.rank);
        group.add(card);
        group.set_visibility(visibility);
    }

    pub fn count(&self, rank: Rank) -> usize {
        self.group(rank).count()
    }

    /// True while any group that is still in play holds a card.
    pub fn has_playable_cards(&self) -> bool {
        self.groups
            .iter()
            .any(|group| !group.is_hidden() && !group.is_empty())
    }

    /// First rank holding all four cards, in rank order.
    pub fn complete_rank(&self) -> Option<Rank> {
        self.groups
            .iter()
            .find(|group| group.count() == 4)
            .map(RankGroup::rank)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(RankGroup::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(RankGroup::is_empty)
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.groups.iter().flat_map(RankGroup::cards)
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::group::Visibility;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn new_hand_is_empty_and_hidden() {
        let hand = Hand::new();
        assert!(hand.is_empty());
        for (i, group) in hand.groups().iter().enumerate() {
            assert_eq!(group.rank().index(), i);
            assert!(group.is_hidden());
        }
        assert!(!hand.has_playable_cards());
    }

    #[test]
    fn receive_groups_cards_by_rank() {
        let mut hand = Hand::new();
        hand.receive(Card::new(Rank::Four, Suit::Clubs), Visibility::FaceUp);
        hand.receive(Card::new(Rank::Four, Suit::Hearts), Visibility::FaceUp);
        hand.receive(Card::new(Rank::King, Suit::Spades), Visibility::FaceUp);
        assert_eq!(hand.count(Rank::Four), 2);
        assert_eq!(hand.count(Rank::King), 1);
        assert_eq!(hand.len(), 3);
        assert!(hand.has_playable_cards());
    }

    #[test]
    fn hidden_groups_do_not_count_as_playable() {
        let mut hand = Hand::new();
        hand.receive(Card::new(Rank::Six, Suit::Clubs), Visibility::FaceDown);
        hand.group_mut(Rank::Six).set_visibility(Visibility::Hidden);
        assert!(!hand.has_playable_cards());
    }

    #[test]
    fn complete_rank_finds_four_of_a_kind() {
        let mut hand = Hand::new();
        for suit in Suit::ALL {
            hand.receive(Card::new(Rank::Eight, suit), Visibility::FaceUp);
        }
        hand.receive(Card::new(Rank::Two, Suit::Clubs), Visibility::FaceUp);
        assert_eq!(hand.complete_rank(), Some(Rank::Eight));
    }
}

use crate::error::GameError;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const DECK_SIZE: usize = 52;
pub const SHUFFLE_SWAPS: usize = 1000;

/// The 52 cards plus a deal cursor. Cards before the cursor belong to some
/// other zone; the cursor never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: usize,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards, dealt: 0 }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Swaps two uniformly chosen positions, 1000 times. This is not a uniform
    /// permutation and must stay that way: saved decks and seeded tests depend
    /// on the exact sequence of draws.
    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..SHUFFLE_SWAPS {
            let a = rng.gen_range(0..DECK_SIZE);
            let b = rng.gen_range(0..DECK_SIZE);
            self.cards.swap(a, b);
        }
    }

    /// Undealt deck in exactly the given order. `None` unless `cards` holds
    /// each of the 52 cards once.
    pub fn from_order(cards: Vec<Card>) -> Option<Self> {
        if cards.len() != DECK_SIZE {
            return None;
        }
        let mut seen = [false; DECK_SIZE];
        for card in &cards {
            if std::mem::replace(&mut seen[card.index()], true) {
                return None;
            }
        }
        Some(Self { cards, dealt: 0 })
    }

    /// Deck that deals `first` and `second` alternately (first, second, first,
    /// ...), then the remaining cards in standard order. `None` if the two
    /// slices differ in length or share a card.
    pub fn stacked(first: &[Card], second: &[Card]) -> Option<Self> {
        if first.len() != second.len() {
            return None;
        }
        let mut order = Vec::with_capacity(DECK_SIZE);
        for (a, b) in first.iter().zip(second) {
            order.push(*a);
            order.push(*b);
        }
        let standard = Self::standard();
        let rest: Vec<Card> = standard
            .cards()
            .iter()
            .filter(|card| !order.contains(card))
            .copied()
            .collect();
        order.extend(rest);
        Self::from_order(order)
    }

    /// Moves the cursor to `dealt` without handing out cards; used when
    /// restoring a saved table whose dealt cards already sit in other zones.
    pub(crate) fn with_dealt(mut self, dealt: usize) -> Self {
        self.dealt = dealt.min(self.cards.len());
        self
    }

    pub fn deal_next(&mut self) -> Result<Card, GameError> {
        let card = *self.cards.get(self.dealt).ok_or(GameError::DeckExhausted)?;
        self.dealt += 1;
        Ok(card)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.dealt
    }

    pub fn is_exhausted(&self) -> bool {
        self.dealt >= self.cards.len()
    }

    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.dealt..]
    }
}

#[cfg(test)]
mod tests {
    use super::{DECK_SIZE, Deck};
    use crate::error::GameError;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), DECK_SIZE);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        for (i, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.index(), i);
        }
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let deck = Deck::shuffled_with_seed(7);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn from_order_rejects_duplicates_and_short_decks() {
        let mut cards = Deck::standard().cards().to_vec();
        assert!(Deck::from_order(cards.clone()).is_some());
        cards[1] = cards[0];
        assert!(Deck::from_order(cards.clone()).is_none());
        cards.pop();
        assert!(Deck::from_order(cards).is_none());
    }

    #[test]
    fn stacked_deck_interleaves_seats() {
        let first = [Card::new(Rank::Ace, Suit::Clubs), Card::new(Rank::Two, Suit::Clubs)];
        let second = [Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::Two, Suit::Hearts)];
        let deck = Deck::stacked(&first, &second).unwrap();
        assert_eq!(&deck.cards()[..4], &[first[0], second[0], first[1], second[1]]);
        assert_eq!(deck.cards().len(), DECK_SIZE);
        assert!(Deck::stacked(&first, &first).is_none());
        assert!(Deck::stacked(&first, &second[..1]).is_none());
    }

    #[test]
    fn dealing_advances_cursor_until_exhausted() {
        let mut deck = Deck::standard();
        for expected in 0..DECK_SIZE {
            assert_eq!(deck.dealt(), expected);
            let card = deck.deal_next().unwrap();
            assert_eq!(card.index(), expected);
        }
        assert!(deck.is_exhausted());
        assert_eq!(deck.remaining(), 0);
        assert!(matches!(deck.deal_next(), Err(GameError::DeckExhausted)));
        assert_eq!(deck.dealt(), DECK_SIZE);
    }
}

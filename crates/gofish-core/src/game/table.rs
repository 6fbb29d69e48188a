use super::state::GameState;
use crate::belief::KnowledgeTracker;
use crate::model::card::Card;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::group::{RankGroup, Visibility};
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::rank::{RANK_COUNT, Rank};
use crate::model::score::ScoreBoard;

pub const INITIAL_HAND_SIZE: usize = 7;

/// Hand-view slot the selection cursor points at.
const SELECTION_SLOT: usize = 6;

/// Everything that makes up a game in progress. Mutated only by
/// [`GameEngine`](super::engine::GameEngine) transitions and rebuilt wholesale
/// on reset or load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) hands: [Hand; 2],
    pub(crate) scores: ScoreBoard,
    pub(crate) stages: [RankGroup; 2],
    pub(crate) exchange: RankGroup,
    pub(crate) deck: Deck,
    pub(crate) ask_rank: Option<Rank>,
    pub(crate) hand_shift: usize,
    pub(crate) state: GameState,
    pub(crate) knowledge: KnowledgeTracker,
}

impl Table {
    /// Deals seven cards each, alternating human then opponent, and scores any
    /// four of a kind dealt straight into a hand.
    pub fn deal(mut deck: Deck) -> Self {
        let mut hands = [Hand::new(), Hand::new()];
        for _ in 0..INITIAL_HAND_SIZE {
            for seat in Seat::BOTH {
                if let Ok(card) = deck.deal_next() {
                    hands[seat.index()].receive(card, held_visibility(seat));
                }
            }
        }

        let mut scores = ScoreBoard::new();
        for seat in Seat::BOTH {
            if let Some(rank) = hands[seat.index()].complete_rank() {
                let captured = hands[seat.index()].group_mut(rank).take();
                scores.capture(seat, captured);
                for hand in hands.iter_mut() {
                    hand.group_mut(rank).set_visibility(Visibility::Hidden);
                }
            }
        }

        let knowledge = KnowledgeTracker::seeded_from(&hands[Seat::Human.index()]);
        let mut table = Self {
            hands,
            scores,
            stages: [RankGroup::hidden(), RankGroup::hidden()],
            exchange: RankGroup::hidden(),
            deck,
            ask_rank: None,
            hand_shift: 0,
            state: GameState::Start,
            knowledge,
        };
        table.state = if table.selected_group().visibility() == Visibility::FaceUp {
            GameState::MyTurn
        } else {
            GameState::MyHandToStageShift
        };
        table
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn stage(&self, seat: Seat) -> &RankGroup {
        &self.stages[seat.index()]
    }

    pub fn exchange(&self) -> &RankGroup {
        &self.exchange
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.scores.score(seat)
    }

    /// Rank asked for in the current or most recent turn.
    pub fn ask_rank(&self) -> Option<Rank> {
        self.ask_rank
    }

    pub fn hand_shift(&self) -> usize {
        self.hand_shift
    }

    /// The opponent's private beliefs. Renderers must go through
    /// [`PlayerView`](super::view::PlayerView), which leaves these out.
    pub fn knowledge(&self) -> &KnowledgeTracker {
        &self.knowledge
    }

    /// Rank under the human's selection cursor.
    pub fn selected_rank(&self) -> Rank {
        let index = (SELECTION_SLOT + RANK_COUNT - self.hand_shift % RANK_COUNT) % RANK_COUNT;
        Rank::ORDERED[index]
    }

    pub fn selected_group(&self) -> &RankGroup {
        self.hands[Seat::Human.index()].group(self.selected_rank())
    }

    /// State implied by the cursor position while the human is choosing a rank.
    pub fn selection_state(&self) -> GameState {
        let rank = self.selected_rank();
        if self.selected_group().visibility() != Visibility::FaceUp {
            return GameState::MyHandToStageShift;
        }

        let other_stage = self.stage(Seat::Opponent);
        if other_stage.visibility() == Visibility::RankOnly {
            return if other_stage.rank() == rank {
                GameState::MyHandToStageOnly
            } else {
                GameState::MyHandToStageShift
            };
        }

        let my_stage = self.stage(Seat::Human);
        if my_stage.is_empty() {
            GameState::MyTurn
        } else if my_stage.rank() == rank {
            GameState::MyHandToStageOnly
        } else {
            GameState::MyHandToStageShift
        }
    }

    /// Every dealt card, gathered from hands, stages, exchange and score piles.
    pub fn located_cards(&self) -> Vec<Card> {
        let hands = self.hands.iter().flat_map(Hand::cards);
        let stages = self.stages.iter().flat_map(RankGroup::cards);
        let piles = Seat::BOTH
            .into_iter()
            .flat_map(|seat| self.scores.pile(seat).iter().flat_map(RankGroup::cards));
        hands
            .chain(stages)
            .chain(self.exchange.cards())
            .chain(piles)
            .collect()
    }

    /// True when every card sits in exactly one place: the dealt prefix of the
    /// deck matches the located cards one-for-one.
    pub fn is_conserved(&self) -> bool {
        let mut expected = [false; DECK_SIZE];
        for card in &self.deck.cards()[..self.deck.dealt()] {
            expected[card.index()] = true;
        }
        let located = self.located_cards();
        if located.len() != self.deck.dealt() {
            return false;
        }
        for card in located {
            if !std::mem::replace(&mut expected[card.index()], false) {
                return false;
            }
        }
        true
    }
}

/// How a seat's own held groups are shown to the human.
pub(crate) const fn held_visibility(seat: Seat) -> Visibility {
    match seat {
        Seat::Human => Visibility::FaceUp,
        Seat::Opponent => Visibility::FaceDown,
    }
}

use super::state::GameState;
use super::table::Table;
use crate::model::card::Card;
use crate::model::group::{RankGroup, Visibility};
use crate::model::player::Seat;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// What a renderer may show of one rank group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    /// `None` while the group is face down or hidden.
    pub rank: Option<Rank>,
    pub visibility: Visibility,
    pub count: usize,
    pub cards: Vec<Card>,
}

impl GroupView {
    pub fn project(group: &RankGroup) -> Self {
        match group.visibility() {
            Visibility::FaceUp | Visibility::RankOnly => Self {
                rank: Some(group.rank()),
                visibility: group.visibility(),
                count: group.count(),
                cards: group.cards().collect(),
            },
            Visibility::FaceDown => Self {
                rank: None,
                visibility: Visibility::FaceDown,
                count: group.count(),
                cards: Vec::new(),
            },
            Visibility::Hidden => Self {
                rank: None,
                visibility: Visibility::Hidden,
                count: 0,
                cards: Vec::new(),
            },
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility != Visibility::Hidden
    }
}

/// The table as the human is allowed to see it. The opponent's beliefs are
/// never part of this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub state: GameState,
    pub is_over: bool,
    pub winner: Option<Seat>,
    pub selected_rank: Rank,
    pub ask_rank: Option<Rank>,
    /// One entry per rank, ace first.
    pub human_hand: Vec<GroupView>,
    /// Opponent groups still in play, ace first.
    pub opponent_hand: Vec<GroupView>,
    pub opponent_card_count: usize,
    pub my_stage: GroupView,
    pub other_stage: GroupView,
    pub exchange: GroupView,
    pub human_pile: Vec<Rank>,
    pub opponent_pile: Vec<Rank>,
    pub human_score: u32,
    pub opponent_score: u32,
    pub deck_remaining: usize,
}

impl PlayerView {
    pub fn capture(table: &Table) -> Self {
        let pile = |seat: Seat| -> Vec<Rank> {
            table
                .scores()
                .pile(seat)
                .iter()
                .map(RankGroup::rank)
                .collect()
        };
        let opponent = table.hand(Seat::Opponent);
        PlayerView {
            state: table.state(),
            is_over: table.state().is_terminal(),
            winner: table.state().winner(),
            selected_rank: table.selected_rank(),
            ask_rank: table.ask_rank(),
            human_hand: table
                .hand(Seat::Human)
                .groups()
                .iter()
                .map(GroupView::project)
                .collect(),
            opponent_hand: opponent
                .groups()
                .iter()
                .map(GroupView::project)
                .filter(GroupView::is_visible)
                .collect(),
            opponent_card_count: opponent.len(),
            my_stage: GroupView::project(table.stage(Seat::Human)),
            other_stage: GroupView::project(table.stage(Seat::Opponent)),
            exchange: GroupView::project(table.exchange()),
            human_pile: pile(Seat::Human),
            opponent_pile: pile(Seat::Opponent),
            human_score: table.score(Seat::Human),
            opponent_score: table.score(Seat::Opponent),
            deck_remaining: table.deck().remaining(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

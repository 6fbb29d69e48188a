mod heuristic;

pub use heuristic::{AskPass, BeliefPolicy, scan_for_ask};

use crate::belief::KnowledgeTracker;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use rand::RngCore;

/// Context provided to the opponent when it has to ask for a rank.
pub struct PolicyContext<'a> {
    pub hand: &'a Hand,
    pub knowledge: &'a KnowledgeTracker,
}

/// Decision interface for the non-human seat.
pub trait Policy: Send {
    /// Choose the rank the opponent asks the human for. Called only from
    /// `OtherTurn`, when the opponent's hand still holds playable cards.
    fn choose_ask(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Rank;
}

use super::{Policy, PolicyContext};
use crate::belief::{KnowledgeTracker, RankBelief};
use crate::model::hand::Hand;
use crate::model::rank::{RANK_COUNT, Rank};
use rand::{Rng, RngCore};
use tracing::{Level, event};

/// Which scan produced the asked rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskPass {
    /// A held rank the human is known to hold.
    KnownHolder,
    /// A held rank the human might hold.
    PossibleHolder,
    /// Any held rank.
    AnyHeld,
    /// Nothing held at all; not a reachable game state.
    Fallback,
}

/// Belief-driven ask selection.
///
/// Three passes over the ranks, each starting at the same random offset and
/// wrapping: first a held rank believed `DoesHave`, then a held rank believed
/// `MightHave`, then any held rank. An empty hand falls back to the ace.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeliefPolicy;

impl BeliefPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for BeliefPolicy {
    fn choose_ask(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Rank {
        let offset = rng.gen_range(0..RANK_COUNT);
        let (rank, pass) = scan_for_ask(ctx.hand, ctx.knowledge, offset);
        log_ask_decision(rank, pass, offset);
        rank
    }
}

/// Runs the three ordered passes starting at rank index `offset`.
pub fn scan_for_ask(hand: &Hand, knowledge: &KnowledgeTracker, offset: usize) -> (Rank, AskPass) {
    let start = Rank::ORDERED[offset % RANK_COUNT];
    let held = |rank: Rank| hand.count(rank) > 0;
    let passes: [(AskPass, fn(RankBelief) -> bool); 3] = [
        (AskPass::KnownHolder, |b| b == RankBelief::DoesHave),
        (AskPass::PossibleHolder, |b| b == RankBelief::MightHave),
        (AskPass::AnyHeld, |_| true),
    ];

    for (pass, accepts) in passes {
        let found = (0..RANK_COUNT)
            .map(|step| start.wrapping_add(step))
            .find(|&rank| held(rank) && accepts(knowledge.get(rank)));
        if let Some(rank) = found {
            return (rank, pass);
        }
    }

    (Rank::Ace, AskPass::Fallback)
}

fn log_ask_decision(rank: Rank, pass: AskPass, offset: usize) {
    if pass == AskPass::Fallback {
        event!(
            target: "gofish_core::policy",
            Level::WARN,
            offset,
            "opponent asked with an empty hand; falling back to ace"
        );
        return;
    }
    event!(
        target: "gofish_core::policy",
        Level::DEBUG,
        rank = %rank,
        pass = ?pass,
        offset
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::Card;
    use crate::model::group::Visibility;
    use crate::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hand_with(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.receive(Card::new(rank, Suit::Clubs), Visibility::FaceDown);
        }
        hand
    }

    #[test]
    fn single_held_rank_is_always_chosen() {
        let hand = hand_with(&[Rank::Five]);
        let knowledge = KnowledgeTracker::new();
        for offset in 0..RANK_COUNT {
            assert_eq!(
                scan_for_ask(&hand, &knowledge, offset),
                (Rank::Five, AskPass::PossibleHolder)
            );
        }

        let mut policy = BeliefPolicy::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let ctx = PolicyContext {
                hand: &hand,
                knowledge: &knowledge,
            };
            assert_eq!(policy.choose_ask(&ctx, &mut rng), Rank::Five);
        }
    }

    #[test]
    fn known_holder_beats_possible_holder() {
        let hand = hand_with(&[Rank::Two, Rank::Nine]);
        let mut knowledge = KnowledgeTracker::new();
        knowledge.on_human_ask(Rank::Nine);
        for offset in 0..RANK_COUNT {
            assert_eq!(
                scan_for_ask(&hand, &knowledge, offset),
                (Rank::Nine, AskPass::KnownHolder)
            );
        }
    }

    #[test]
    fn scan_wraps_from_offset() {
        let hand = hand_with(&[Rank::Two, Rank::Queen]);
        let knowledge = KnowledgeTracker::new();
        assert_eq!(scan_for_ask(&hand, &knowledge, 0).0, Rank::Two);
        assert_eq!(scan_for_ask(&hand, &knowledge, 2).0, Rank::Queen);
        assert_eq!(scan_for_ask(&hand, &knowledge, 12).0, Rank::Two);
    }

    #[test]
    fn excluded_beliefs_fall_through_to_any_held() {
        let hand = hand_with(&[Rank::Four]);
        let mut knowledge = KnowledgeTracker::new();
        knowledge.on_opponent_ask(Rank::Four);
        assert_eq!(
            scan_for_ask(&hand, &knowledge, 7),
            (Rank::Four, AskPass::AnyHeld)
        );
    }

    #[test]
    fn empty_hand_falls_back_to_ace() {
        let hand = Hand::new();
        let knowledge = KnowledgeTracker::new();
        assert_eq!(
            scan_for_ask(&hand, &knowledge, 5),
            (Rank::Ace, AskPass::Fallback)
        );
    }
}

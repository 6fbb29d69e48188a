//! The opponent's private beliefs about the human's hand.
//!
//! One [`RankBelief`] per rank, updated only by game transitions:
//! - set on every ask (`DoesHave` after the human asks, `DoesNotHave` after the opponent asks),
//! - relaxed back to `MightHave` when the human draws a card the opponent cannot see,
//! - frozen at `CannotHave` once the rank is captured.
//!
//! Nothing in here may reach the human-facing view of the table.

mod tracker;

pub use tracker::{KnowledgeTracker, RankBelief};

use gofish_core::GameState;
use gofish_core::game::view::{GroupView, PlayerView};
use gofish_core::model::group::Visibility;
use gofish_core::model::player::Seat;
use gofish_core::model::rank::Rank;
use std::fmt::Write as _;

fn group_text(group: &GroupView) -> String {
    match group.visibility {
        Visibility::FaceUp => {
            let cards: Vec<String> = group.cards.iter().map(ToString::to_string).collect();
            cards.join(" ")
        }
        Visibility::FaceDown => "#".repeat(group.count.max(1)),
        Visibility::RankOnly => match group.rank {
            Some(rank) if group.count == 0 => format!("({rank})"),
            Some(rank) => format!("{rank}x{}", group.count),
            None => String::new(),
        },
        Visibility::Hidden => "-".to_string(),
    }
}

fn pile_text(pile: &[Rank]) -> String {
    if pile.is_empty() {
        return "-".to_string();
    }
    pile.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// What the human is expected to do next.
pub fn prompt(view: &PlayerView) -> String {
    let selected = view.selected_rank;
    match view.state {
        GameState::MyTurn => format!("Ask for {selected}? [enter] ask, [a]/[d] move"),
        GameState::MyHandToStageShift => match view.other_stage.rank {
            Some(asked) if view.other_stage.visibility == Visibility::RankOnly => {
                format!("Opponent wants your {asked}s. [a]/[d] to select them")
            }
            _ => "Select a rank you hold with [a]/[d]".to_string(),
        },
        GameState::MyHandToStageOnly => format!("[enter] hand over your {selected}s"),
        GameState::MyWin => "You win! [new] for another game, [q] to quit".to_string(),
        GameState::OtherWin => "Opponent wins. [new] for another game, [q] to quit".to_string(),
        GameState::Tie => "Tie game. [new] for another game, [q] to quit".to_string(),
        state => match state.mover() {
            Some(Seat::Opponent) => "Opponent is playing. [enter] to continue".to_string(),
            _ => "[enter] to continue".to_string(),
        },
    }
}

/// Plain-text board: opponent on top, shared zones in the middle, the
/// human's hand with the cursor marked at the bottom.
pub fn render(view: &PlayerView) -> String {
    let mut out = String::new();
    let opponent: Vec<String> = view.opponent_hand.iter().map(group_text).collect();
    let _ = writeln!(
        out,
        "Opponent ({} cards): {}",
        view.opponent_card_count,
        opponent.join("  ")
    );
    let _ = writeln!(
        out,
        "Opponent sets [{}]: {}",
        view.opponent_score,
        pile_text(&view.opponent_pile)
    );
    let _ = writeln!(
        out,
        "Their stage: {:<12} Exchange: {:<12} Your stage: {}",
        group_text(&view.other_stage),
        group_text(&view.exchange),
        group_text(&view.my_stage)
    );
    let _ = writeln!(out, "Deck: {} left", view.deck_remaining);
    let _ = writeln!(
        out,
        "Your sets [{}]: {}",
        view.human_score,
        pile_text(&view.human_pile)
    );

    let mut hand = Vec::new();
    for (rank, group) in Rank::ORDERED.iter().zip(&view.human_hand) {
        if group.visibility == Visibility::Hidden && *rank != view.selected_rank {
            continue;
        }
        let text = if group.visibility == Visibility::Hidden {
            format!("{rank}:-")
        } else {
            group_text(group)
        };
        if *rank == view.selected_rank {
            hand.push(format!(">{text}<"));
        } else {
            hand.push(text);
        }
    }
    let _ = writeln!(out, "Your hand: {}", hand.join("  "));
    let _ = write!(out, "{}", prompt(view));
    out
}

//! Line-oriented save format: one signed decimal integer per line.
//!
//! Layout, in order: both hands (13 groups each), both score piles (length
//! then groups), the two stages and the exchange, the 52 deck cards, then the
//! deal cursor, ask rank (`-1` for none), cursor shift, state ordinal, both
//! scores and the 13 knowledge ordinals.
//!
//! A group is written as its rank, then per suit a presence flag followed by
//! the card's suit and rank when present, then its visibility ordinal.

use super::state::GameState;
use super::table::Table;
use crate::belief::{KnowledgeTracker, RankBelief};
use crate::error::GameError;
use crate::model::card::Card;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::group::{RankGroup, Visibility};
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::rank::{RANK_COUNT, Rank};
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use std::fmt::Write as _;

pub fn encode(table: &Table) -> String {
    let mut out = LineWriter::default();
    for hand in &table.hands {
        for group in hand.groups() {
            out.group(group);
        }
    }
    for seat in Seat::BOTH {
        let pile = table.scores.pile(seat);
        out.int(pile.len() as i64);
        for group in pile {
            out.group(group);
        }
    }
    for stage in &table.stages {
        out.group(stage);
    }
    out.group(&table.exchange);
    for card in table.deck.cards() {
        out.card(*card);
    }
    out.int(table.deck.dealt() as i64);
    out.int(table.ask_rank.map_or(-1, |rank| rank.index() as i64));
    out.int(table.hand_shift as i64);
    out.int(table.state.ordinal() as i64);
    for seat in Seat::BOTH {
        out.int(i64::from(table.score(seat)));
    }
    for belief in table.knowledge.beliefs() {
        out.int(belief.ordinal() as i64);
    }
    out.finish()
}

pub fn decode(text: &str) -> Result<Table, GameError> {
    let mut reader = LineReader::new(text);

    let mut hands = [Hand::new(), Hand::new()];
    for hand in hands.iter_mut() {
        for expected in Rank::ORDERED {
            let line = reader.next_line();
            let group = reader.group()?;
            if group.rank() != expected {
                return Err(GameError::malformed(
                    line,
                    format!("hand group for {expected} stored as {}", group.rank()),
                ));
            }
            *hand.group_mut(expected) = group;
        }
    }

    let mut piles: [Vec<RankGroup>; 2] = [Vec::new(), Vec::new()];
    for pile in piles.iter_mut() {
        let len = reader.bounded(RANK_COUNT, "score pile length")?;
        for _ in 0..len {
            let line = reader.next_line();
            let group = reader.group()?;
            if group.count() != 4 {
                return Err(GameError::malformed(
                    line,
                    format!("captured {} holds {} cards", group.rank(), group.count()),
                ));
            }
            pile.push(group);
        }
    }
    let scores = ScoreBoard::from_piles(piles);

    let stages = [reader.group()?, reader.group()?];
    let exchange = reader.group()?;

    let deck_line = reader.next_line();
    let mut order = Vec::with_capacity(DECK_SIZE);
    for _ in 0..DECK_SIZE {
        order.push(reader.card()?);
    }
    let deck = Deck::from_order(order)
        .ok_or_else(|| GameError::malformed(deck_line, "deck is not a permutation of 52 cards"))?;

    let dealt_line = reader.next_line();
    let dealt = reader.bounded(DECK_SIZE + 1, "deal cursor")?;
    let deck = deck.with_dealt(dealt);

    let ask_line = reader.next_line();
    let ask_rank = match reader.int()? {
        -1 => None,
        value => Some(
            usize::try_from(value)
                .ok()
                .and_then(Rank::from_index)
                .ok_or_else(|| GameError::malformed(ask_line, format!("ask rank {value}")))?,
        ),
    };
    let hand_shift = reader.bounded(RANK_COUNT, "cursor shift")?;
    let state_line = reader.next_line();
    let state = GameState::from_ordinal(reader.bounded(usize::MAX, "state")?)
        .ok_or_else(|| GameError::malformed(state_line, "state ordinal out of range"))?;

    for seat in Seat::BOTH {
        let line = reader.next_line();
        let stored = reader.int()?;
        if stored != i64::from(scores.score(seat)) {
            return Err(GameError::malformed(
                line,
                format!(
                    "{seat} score {stored} does not match {} captured ranks",
                    scores.score(seat)
                ),
            ));
        }
    }

    let mut beliefs = [RankBelief::MightHave; RANK_COUNT];
    for belief in beliefs.iter_mut() {
        let line = reader.next_line();
        *belief = RankBelief::from_ordinal(reader.bounded(usize::MAX, "knowledge")?)
            .ok_or_else(|| GameError::malformed(line, "knowledge ordinal out of range"))?;
    }
    reader.expect_end()?;

    let table = Table {
        hands,
        scores,
        stages,
        exchange,
        deck,
        ask_rank,
        hand_shift,
        state,
        knowledge: KnowledgeTracker::from_beliefs(beliefs),
    };
    if !table.is_conserved() {
        return Err(GameError::malformed(
            dealt_line,
            "dealt cards do not match the cards on the table",
        ));
    }
    check_zones(&table).map_err(|reason| GameError::malformed(state_line, reason))?;
    Ok(table)
}

/// Rejects tables whose stages and exchange could not take part in the next
/// `advance` of the stored state without mixing ranks or dropping cards.
fn check_zones(table: &Table) -> Result<(), String> {
    let state = table.state;
    let exchange = &table.exchange;
    let waiting_on_exchange = matches!(
        state,
        GameState::ExchangeToMyStage | GameState::ExchangeToOtherStage
    );
    if !exchange.is_empty() && !waiting_on_exchange {
        return Err(format!("exchange holds {} cards in {state}", exchange.count()));
    }

    let human_stage = &table.stages[Seat::Human.index()];
    match state {
        GameState::ExchangeToMyStage | GameState::ExchangeToOtherStage => {
            let seat = match state {
                GameState::ExchangeToMyStage => Seat::Human,
                _ => Seat::Opponent,
            };
            if !exchange.is_empty() && !table.stages[seat.index()].is_empty() {
                return Err(format!("{seat} stage is not empty in {state}"));
            }
        }
        GameState::MyHandToStageOnly => {
            let selected = table.selected_rank();
            if !human_stage.is_empty() && human_stage.rank() != selected {
                return Err(format!(
                    "human stage holds {} while {selected} is selected",
                    human_stage.rank()
                ));
            }
        }
        GameState::MyStageToScore | GameState::OtherStageToScore => {
            let seat = match state {
                GameState::MyStageToScore => Seat::Human,
                _ => Seat::Opponent,
            };
            let count = table.stages[seat.index()].count();
            if count != 4 {
                return Err(format!("{seat} stage holds {count} cards in {state}"));
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Default)]
struct LineWriter {
    out: String,
}

impl LineWriter {
    fn int(&mut self, value: i64) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.out, "{value}");
    }

    fn card(&mut self, card: Card) {
        self.int(card.suit.index() as i64);
        self.int(card.rank.index() as i64);
    }

    fn group(&mut self, group: &RankGroup) {
        self.int(group.rank().index() as i64);
        for slot in group.slots() {
            match slot {
                Some(card) => {
                    self.int(1);
                    self.card(*card);
                }
                None => self.int(0),
            }
        }
        self.int(group.visibility().ordinal() as i64);
    }

    fn finish(self) -> String {
        self.out
    }
}

struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    consumed: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            consumed: 0,
        }
    }

    /// 1-based number of the line the next read will consume.
    fn next_line(&self) -> usize {
        self.consumed + 1
    }

    fn int(&mut self) -> Result<i64, GameError> {
        let line = self.next_line();
        let raw = self
            .lines
            .next()
            .ok_or_else(|| GameError::malformed(line, "unexpected end of save"))?;
        self.consumed += 1;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| GameError::malformed(line, format!("expected an integer, found {raw:?}")))
    }

    /// Reads a value in `0..limit`.
    fn bounded(&mut self, limit: usize, what: &str) -> Result<usize, GameError> {
        let line = self.next_line();
        let value = self.int()?;
        usize::try_from(value)
            .ok()
            .filter(|v| *v < limit)
            .ok_or_else(|| GameError::malformed(line, format!("{what} {value} out of range")))
    }

    fn rank(&mut self) -> Result<Rank, GameError> {
        let line = self.next_line();
        let index = self.bounded(RANK_COUNT, "rank")?;
        Rank::from_index(index).ok_or_else(|| GameError::malformed(line, "rank out of range"))
    }

    fn suit(&mut self) -> Result<Suit, GameError> {
        let line = self.next_line();
        let index = self.bounded(Suit::ALL.len(), "suit")?;
        Suit::from_index(index).ok_or_else(|| GameError::malformed(line, "suit out of range"))
    }

    fn card(&mut self) -> Result<Card, GameError> {
        let suit = self.suit()?;
        let rank = self.rank()?;
        Ok(Card::new(rank, suit))
    }

    fn group(&mut self) -> Result<RankGroup, GameError> {
        let rank = self.rank()?;
        let mut group = RankGroup::new(rank, Visibility::Hidden);
        for suit in Suit::ALL {
            let line = self.next_line();
            match self.int()? {
                0 => {}
                1 => {
                    let card_line = self.next_line();
                    let card = self.card()?;
                    if card.suit != suit || card.rank != rank {
                        return Err(GameError::malformed(
                            card_line,
                            format!("{card} stored in the {suit} slot of a {rank} group"),
                        ));
                    }
                    group.add(card);
                }
                other => {
                    return Err(GameError::malformed(line, format!("presence flag {other}")));
                }
            }
        }
        let line = self.next_line();
        let visibility = Visibility::from_ordinal(self.bounded(usize::MAX, "visibility")?)
            .ok_or_else(|| GameError::malformed(line, "visibility ordinal out of range"))?;
        group.set_visibility(visibility);
        Ok(group)
    }

    fn expect_end(&mut self) -> Result<(), GameError> {
        let line = self.next_line();
        match self.lines.by_ref().find(|raw| !raw.trim().is_empty()) {
            Some(_) => Err(GameError::malformed(line, "trailing content after save")),
            None => Ok(()),
        }
    }
}

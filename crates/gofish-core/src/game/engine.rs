use super::serialization;
use super::state::GameState;
use super::table::{Table, held_visibility};
use super::view::PlayerView;
use crate::error::GameError;
use crate::model::deck::Deck;
use crate::model::group::Visibility;
use crate::model::player::Seat;
use crate::model::rank::RANK_COUNT;
use crate::policy::{BeliefPolicy, Policy, PolicyContext};
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

/// Direction of a cursor move over the human's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Left,
    Right,
}

impl ShiftDirection {
    pub const fn delta(self) -> isize {
        match self {
            ShiftDirection::Left => -1,
            ShiftDirection::Right => 1,
        }
    }
}

/// The rule engine: owns the table, the opponent policy and the random source
/// used for shuffling and for the opponent's choices.
///
/// Commands never fail. Anything a command cannot do in the current state is
/// ignored and reported through the `bool` return value.
pub struct GameEngine {
    table: Table,
    rng: StdRng,
    seed: u64,
    policy: Box<dyn Policy>,
}

impl GameEngine {
    pub fn new() -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        Self::assemble(Table::deal(deck), rng, seed)
    }

    /// Deals from `deck` as given; `seed` only drives the opponent and later resets.
    pub fn with_deck(deck: Deck, seed: u64) -> Self {
        Self::assemble(Table::deal(deck), StdRng::seed_from_u64(seed), seed)
    }

    pub fn from_table(table: Table, seed: u64) -> Self {
        Self::assemble(table, StdRng::seed_from_u64(seed), seed)
    }

    pub fn with_policy(mut self, policy: Box<dyn Policy>) -> Self {
        self.policy = policy;
        self
    }

    fn assemble(table: Table, rng: StdRng, seed: u64) -> Self {
        let engine = Self {
            table,
            rng,
            seed,
            policy: Box::new(BeliefPolicy::new()),
        };
        engine.log_deal();
        engine
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn state(&self) -> GameState {
        self.table.state
    }

    pub fn is_over(&self) -> bool {
        self.table.state.is_terminal()
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.table.score(seat)
    }

    pub fn view(&self) -> PlayerView {
        PlayerView::capture(&self.table)
    }

    /// Throws the current game away and deals a fresh one from the engine's
    /// random source.
    pub fn reset(&mut self) {
        let deck = Deck::shuffled(&mut self.rng);
        self.table = Table::deal(deck);
        self.log_deal();
    }

    /// Moves the selection cursor one rank. Only honoured while the human is
    /// choosing a rank; the cards themselves never move.
    pub fn shift(&mut self, direction: ShiftDirection) -> bool {
        let from = self.table.state;
        if !from.accepts_shift() {
            return false;
        }
        let shift = self.table.hand_shift as isize + direction.delta();
        self.table.hand_shift = shift.rem_euclid(RANK_COUNT as isize) as usize;
        self.table.state = self.table.selection_state();
        event!(
            target: "gofish_core::engine",
            Level::DEBUG,
            selected = %self.table.selected_rank(),
            from = %from,
            to = %self.table.state,
            "shift"
        );
        true
    }

    /// Performs the action of the current state and moves to the next one.
    pub fn advance(&mut self) -> bool {
        let from = self.table.state;
        let next = match from {
            GameState::Start
            | GameState::MyHandToStageShift
            | GameState::MyWin
            | GameState::OtherWin
            | GameState::Tie => return false,
            GameState::MyTurn => self.human_asks(),
            GameState::MyHandToStageOnly => self.human_hand_to_stage(),
            GameState::MyStageToHand => self.stage_to_hand(Seat::Human),
            GameState::MyStageToExchange => self.stage_to_exchange(Seat::Human),
            GameState::MyStageToScore => self.stage_to_score(Seat::Human),
            GameState::ExchangeToMyStage => self.exchange_to_stage(Seat::Human),
            GameState::OtherTurn => self.opponent_asks(),
            GameState::OtherHandToStage => self.opponent_hand_to_stage(),
            GameState::OtherStageToHand => self.stage_to_hand(Seat::Opponent),
            GameState::OtherStageToExchange => self.stage_to_exchange(Seat::Opponent),
            GameState::OtherStageToScore => self.stage_to_score(Seat::Opponent),
            GameState::ExchangeToOtherStage => self.exchange_to_stage(Seat::Opponent),
            GameState::MyDrawToExchange => self.draw_to_exchange(Seat::Human),
            GameState::OtherDrawToExchange => self.draw_to_exchange(Seat::Opponent),
        };
        self.table.state = next;
        event!(
            target: "gofish_core::engine",
            Level::DEBUG,
            from = %from,
            to = %next,
            deck_remaining = self.table.deck.remaining()
        );
        true
    }

    /// Serialized form of the whole table.
    pub fn save(&self) -> String {
        serialization::encode(&self.table)
    }

    /// Restores a saved table. A save that cannot be decoded is discarded and a
    /// fresh game is dealt instead; the return value says which happened.
    pub fn load(&mut self, text: &str) -> bool {
        match self.try_load(text) {
            Ok(()) => true,
            Err(err) => {
                self.recover(&err);
                false
            }
        }
    }

    /// Restores a saved table, reporting why it could not be restored.
    pub fn try_load(&mut self, text: &str) -> Result<(), GameError> {
        self.table = serialization::decode(text)?;
        event!(
            target: "gofish_core::engine",
            Level::INFO,
            state = %self.table.state,
            human_score = self.table.score(Seat::Human),
            opponent_score = self.table.score(Seat::Opponent),
            "restored saved game"
        );
        Ok(())
    }

    /// Falls back to a fresh game after a failed restore.
    pub fn recover(&mut self, err: &GameError) {
        event!(
            target: "gofish_core::engine",
            Level::WARN,
            error = %err,
            "discarding saved game"
        );
        self.reset();
    }

    fn human_asks(&mut self) -> GameState {
        let table = &mut self.table;
        let rank = table.selected_rank();
        table.ask_rank = Some(rank);
        table.knowledge.on_human_ask(rank);
        let stage = &mut table.stages[Seat::Human.index()];
        stage.set_rank(rank);
        stage.set_visibility(Visibility::RankOnly);
        if table.hands[Seat::Opponent.index()].count(rank) > 0 {
            GameState::OtherHandToStage
        } else {
            GameState::MyDrawToExchange
        }
    }

    fn human_hand_to_stage(&mut self) -> GameState {
        let rank = self.table.selected_rank();
        let Table { hands, stages, .. } = &mut self.table;
        let group = hands[Seat::Human.index()].group_mut(rank);
        let stage = &mut stages[Seat::Human.index()];
        stage.transfer(group);
        stage.set_visibility(Visibility::FaceUp);
        group.set_visibility(Visibility::RankOnly);
        if stages[Seat::Opponent.index()].visibility() == Visibility::RankOnly {
            GameState::MyStageToExchange
        } else {
            GameState::MyStageToScore
        }
    }

    fn stage_to_hand(&mut self, seat: Seat) -> GameState {
        let Table { hands, stages, .. } = &mut self.table;
        let stage = &mut stages[seat.index()];
        let group = hands[seat.index()].group_mut(stage.rank());
        group.transfer(stage);
        group.set_visibility(held_visibility(seat));
        let keeps_turn = stage.visibility() == Visibility::FaceUp;
        stage.set_visibility(Visibility::Hidden);

        let next = match (seat, keeps_turn) {
            (Seat::Human, true) => GameState::MyTurn,
            (Seat::Human, false) => GameState::OtherTurn,
            (Seat::Opponent, true) => GameState::OtherTurn,
            (Seat::Opponent, false) => self.table.selection_state(),
        };
        self.end_check(next)
    }

    fn stage_to_exchange(&mut self, seat: Seat) -> GameState {
        let Table {
            stages, exchange, ..
        } = &mut self.table;
        let stage = &mut stages[seat.index()];
        exchange.transfer(stage);
        exchange.set_visibility(stage.visibility());
        stage.set_visibility(Visibility::Hidden);
        match seat.other() {
            Seat::Human => GameState::ExchangeToMyStage,
            Seat::Opponent => GameState::ExchangeToOtherStage,
        }
    }

    fn stage_to_score(&mut self, seat: Seat) -> GameState {
        let table = &mut self.table;
        let stage = &mut table.stages[seat.index()];
        let rank = stage.rank();
        let captured = stage.take();
        stage.set_visibility(Visibility::Hidden);
        table.scores.capture(seat, captured);
        table.knowledge.on_capture(rank);
        for hand in table.hands.iter_mut() {
            hand.group_mut(rank).set_visibility(Visibility::Hidden);
        }
        event!(
            target: "gofish_core::engine",
            Level::INFO,
            seat = %seat,
            rank = %rank,
            human_score = table.score(Seat::Human),
            opponent_score = table.score(Seat::Opponent),
            "captured rank"
        );

        let asked = table.ask_rank == Some(rank);
        let next = match (seat, asked) {
            (Seat::Human, true) => table.selection_state(),
            (Seat::Human, false) => GameState::OtherTurn,
            (Seat::Opponent, true) => GameState::OtherTurn,
            (Seat::Opponent, false) => table.selection_state(),
        };
        self.end_check(next)
    }

    fn exchange_to_stage(&mut self, seat: Seat) -> GameState {
        let table = &mut self.table;
        let stage = &mut table.stages[seat.index()];
        stage.transfer(&mut table.exchange);
        stage.set_visibility(table.exchange.visibility());
        table.exchange.set_visibility(Visibility::Hidden);

        let completes = stage.count() + table.hands[seat.index()].count(stage.rank()) == 4;
        let face_down = stage.visibility() == Visibility::FaceDown;
        if face_down && completes {
            stage.set_visibility(Visibility::FaceUp);
        }

        match (seat, face_down, completes) {
            (Seat::Human, true, true) => table.selection_state(),
            (Seat::Human, true, false) => {
                table.knowledge.on_undisclosed_draw();
                GameState::MyStageToHand
            }
            (Seat::Human, false, true) => GameState::MyHandToStageOnly,
            (Seat::Human, false, false) => GameState::MyStageToHand,
            (Seat::Opponent, _, true) => GameState::OtherHandToStage,
            (Seat::Opponent, _, false) => GameState::OtherStageToHand,
        }
    }

    fn opponent_asks(&mut self) -> GameState {
        let ctx = PolicyContext {
            hand: &self.table.hands[Seat::Opponent.index()],
            knowledge: &self.table.knowledge,
        };
        let rank = self.policy.choose_ask(&ctx, &mut self.rng);

        let table = &mut self.table;
        table.ask_rank = Some(rank);
        table.knowledge.on_opponent_ask(rank);
        let stage = &mut table.stages[Seat::Opponent.index()];
        stage.set_rank(rank);
        stage.set_visibility(Visibility::RankOnly);

        if table.hands[Seat::Human.index()].count(rank) > 0 {
            if table.selected_rank() == rank {
                GameState::MyHandToStageOnly
            } else {
                GameState::MyHandToStageShift
            }
        } else {
            GameState::OtherDrawToExchange
        }
    }

    fn opponent_hand_to_stage(&mut self) -> GameState {
        let Table { hands, stages, .. } = &mut self.table;
        let completing = !stages[Seat::Opponent.index()].is_empty();
        let rank = if completing {
            stages[Seat::Opponent.index()].rank()
        } else {
            stages[Seat::Human.index()].rank()
        };
        let group = hands[Seat::Opponent.index()].group_mut(rank);
        let stage = &mut stages[Seat::Opponent.index()];
        stage.transfer(group);
        stage.set_visibility(Visibility::FaceUp);
        group.set_visibility(Visibility::RankOnly);
        if completing {
            GameState::OtherStageToScore
        } else {
            GameState::OtherStageToExchange
        }
    }

    fn draw_to_exchange(&mut self, seat: Seat) -> GameState {
        let card = match self.table.deck.deal_next() {
            Ok(card) => card,
            Err(err) => {
                event!(
                    target: "gofish_core::engine",
                    Level::DEBUG,
                    seat = %seat,
                    error = %err,
                    "nothing to draw"
                );
                let next = match seat {
                    Seat::Human => GameState::OtherTurn,
                    Seat::Opponent => self.table.selection_state(),
                };
                return self.end_check(next);
            }
        };

        let table = &mut self.table;
        let asked = table.stages[seat.index()].rank();
        table.exchange.add(card);
        table.exchange.set_visibility(if card.rank == asked {
            Visibility::FaceUp
        } else {
            Visibility::FaceDown
        });
        match seat {
            Seat::Human => GameState::ExchangeToMyStage,
            Seat::Opponent => GameState::ExchangeToOtherStage,
        }
    }

    /// Ends the game once the deck is gone or either hand has nothing left in
    /// play; otherwise continues with `next`.
    fn end_check(&self, next: GameState) -> GameState {
        let table = &self.table;
        let over = table.deck.is_exhausted()
            || table.hands.iter().any(|hand| !hand.has_playable_cards());
        if !over {
            return next;
        }
        let outcome = match table.scores.leading_seat() {
            Some(Seat::Human) => GameState::MyWin,
            Some(Seat::Opponent) => GameState::OtherWin,
            None => GameState::Tie,
        };
        event!(
            target: "gofish_core::engine",
            Level::INFO,
            outcome = %outcome,
            human_score = table.score(Seat::Human),
            opponent_score = table.score(Seat::Opponent),
            deck_remaining = table.deck.remaining(),
            "game over"
        );
        outcome
    }

    fn log_deal(&self) {
        event!(
            target: "gofish_core::engine",
            Level::INFO,
            seed = self.seed,
            state = %self.table.state,
            human_score = self.table.score(Seat::Human),
            opponent_score = self.table.score(Seat::Opponent),
            "dealt new game"
        );
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("seed", &self.seed)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

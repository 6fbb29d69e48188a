pub mod card;
pub mod deck;
pub mod group;
pub mod hand;
pub mod player;
pub mod rank;
pub mod score;
pub mod suit;

pub mod cards;
pub mod events;
pub mod piles;
pub mod player;
pub mod turn;
pub mod uno_game;
pub use cards::*;
pub use piles::{Deck, DiscardPile, Hand};
pub use player::{ClientPlayer, PlayerRecord, PublicPlayerState, ServerPlayer};
pub use turn::{Direction, TurnState};
pub use uno_game::UnoGame;

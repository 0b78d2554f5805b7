use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::cards::Card;
use crate::game::piles::Hand;

/// What the turn state machine needs from a seat, whether it holds the real
/// hand (server) or only knows how many cards are in it (client).
pub trait PlayerRecord {
    fn name(&self) -> &str;
    fn hand_size(&self) -> usize;
    fn is_uno(&self) -> bool;

    /// Takes `card` out of the hand. Must not change anything on failure.
    fn play(&mut self, card: &Card) -> Result<Card, GameError>;

    /// Adds `count` cards; `cards` is empty when the identities are hidden.
    fn receive(&mut self, count: usize, cards: Vec<Card>);

    fn clear(&mut self);

    fn public_state(&self) -> PublicPlayerState {
        PublicPlayerState {
            name: self.name().to_string(),
            remaining_card_count: self.hand_size(),
            is_uno: self.is_uno(),
        }
    }
}

/// The summary of a seat every connection may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayerState {
    pub name: String,
    pub remaining_card_count: usize,
    pub is_uno: bool,
}

/// Server-side seat owning the authoritative hand.
#[derive(Debug, Clone)]
pub struct ServerPlayer {
    name: String,
    hand: Hand,
    uno: bool,
}

impl ServerPlayer {
    pub fn new(name: &str) -> ServerPlayer {
        ServerPlayer {
            name: name.to_string(),
            hand: Hand::new(),
            uno: false,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }
}

impl PlayerRecord for ServerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand_size(&self) -> usize {
        self.hand.len()
    }

    fn is_uno(&self) -> bool {
        self.uno
    }

    fn play(&mut self, card: &Card) -> Result<Card, GameError> {
        let played = self.hand.play_matching(card.rank(), card.color())?;
        self.uno = self.hand.len() == 1;
        Ok(played)
    }

    fn receive(&mut self, count: usize, cards: Vec<Card>) {
        debug_assert_eq!(count, cards.len());
        self.hand.extend(cards);
        self.uno = false;
    }

    fn clear(&mut self) {
        self.hand.clear();
        self.uno = false;
    }
}

/// Client-side view of any seat: a name and a card count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPlayer {
    name: String,
    remaining: usize,
    uno: bool,
}

impl ClientPlayer {
    pub fn new(name: &str, remaining: usize, uno: bool) -> ClientPlayer {
        ClientPlayer {
            name: name.to_string(),
            remaining,
            uno,
        }
    }
}

impl From<PublicPlayerState> for ClientPlayer {
    fn from(state: PublicPlayerState) -> Self {
        ClientPlayer {
            name: state.name,
            remaining: state.remaining_card_count,
            uno: state.is_uno,
        }
    }
}

impl PlayerRecord for ClientPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand_size(&self) -> usize {
        self.remaining
    }

    fn is_uno(&self) -> bool {
        self.uno
    }

    fn play(&mut self, card: &Card) -> Result<Card, GameError> {
        if self.remaining == 0 {
            return Err(GameError::CardNotFound {
                rank: card.rank(),
                color: card.color(),
            });
        }
        self.remaining -= 1;
        self.uno = self.remaining == 1;
        Ok(*card)
    }

    fn receive(&mut self, count: usize, _cards: Vec<Card>) {
        self.remaining += count;
        self.uno = false;
    }

    fn clear(&mut self) {
        self.remaining = 0;
        self.uno = false;
    }
}

impl Display for ServerPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "====================================")?;
        writeln!(f, "Player: {:<20}", self.name)?;
        writeln!(f, "------------------------------------")?;
        writeln!(f, "{:<5} | {:<15}", "Index", "Card")?;
        writeln!(f, "------------------------------------")?;
        for (idx, card) in self.hand.cards().iter().enumerate() {
            writeln!(f, "{:>5} | {:<15}", idx, card.to_string())?;
        }
        writeln!(f, "====================================")
    }
}

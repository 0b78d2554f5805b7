use serde::{Deserialize, Serialize};

use crate::game::cards::Card;
use crate::game::player::PublicPlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadType {
    JoinGame,
    StartGame,
    DrawCard,
    PlayCard,
    InitGame,
    EndGame,
    Empty,
}

impl PayloadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadType::JoinGame => "JOIN_GAME",
            PayloadType::StartGame => "START_GAME",
            PayloadType::DrawCard => "DRAW_CARD",
            PayloadType::PlayCard => "PLAY_CARD",
            PayloadType::InitGame => "INIT_GAME",
            PayloadType::EndGame => "END_GAME",
            PayloadType::Empty => "EMPTY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinGame {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCard {
    pub draw_count: usize,
    /// Only the drawing connection learns which cards were drawn.
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayCard {
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitGame {
    pub player_id: usize,
    pub players: Vec<PublicPlayerState>,
    /// Top card first.
    pub discard_pile: Vec<Card>,
    pub hand_card: Vec<Card>,
    pub current_player: usize,
}

/// One protocol message. The envelope status follows from the variant:
/// `Empty` is the only `INVALID` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    JoinGame(JoinGame),
    StartGame,
    DrawCard(DrawCard),
    PlayCard(PlayCard),
    InitGame(InitGame),
    EndGame,
    Empty,
}

impl Message {
    pub fn join(name: &str) -> Message {
        Message::JoinGame(JoinGame {
            name: name.to_string(),
        })
    }

    pub fn draw(draw_count: usize, cards: Vec<Card>) -> Message {
        Message::DrawCard(DrawCard { draw_count, cards })
    }

    pub fn play(card: Card) -> Message {
        Message::PlayCard(PlayCard { card })
    }

    pub fn invalid() -> Message {
        Message::Empty
    }

    pub fn status(&self) -> Status {
        match self {
            Message::Empty => Status::Invalid,
            _ => Status::Ok,
        }
    }

    pub fn payload_type(&self) -> PayloadType {
        match self {
            Message::JoinGame(_) => PayloadType::JoinGame,
            Message::StartGame => PayloadType::StartGame,
            Message::DrawCard(_) => PayloadType::DrawCard,
            Message::PlayCard(_) => PayloadType::PlayCard,
            Message::InitGame(_) => PayloadType::InitGame,
            Message::EndGame => PayloadType::EndGame,
            Message::Empty => PayloadType::Empty,
        }
    }
}

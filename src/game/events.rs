use std::fmt::Display;

use crate::game::cards::Card;
use crate::game::turn::Direction;

/// Things that happened at the table, published for observers such as the
/// log. These never travel over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PlayerJoined {
        seat: usize,
        name: String,
    },
    PlayerReady {
        seat: usize,
        ready: usize,
        seats: usize,
    },
    RoundStarted {
        players: usize,
        top_card: Card,
        first_player: usize,
    },
    CardPlayed {
        seat: usize,
        card: Card,
    },
    CardsDrawn {
        seat: usize,
        count: usize,
    },
    DirectionChanged {
        direction: Direction,
    },
    PlayerTurn {
        seat: usize,
        pending_draw: usize,
    },
    RoundOver {
        winner: usize,
        scores: Vec<(String, u32)>,
    },
    Rejected {
        conn_id: u64,
        reason: String,
    },
}

impl Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::PlayerJoined { seat, name } => {
                write!(f, "PlayerJoined: seat={}, name={}", seat, name)
            }
            GameEvent::PlayerReady { seat, ready, seats } => {
                write!(f, "PlayerReady: seat={}, ready={}/{}", seat, ready, seats)
            }
            GameEvent::RoundStarted {
                players,
                top_card,
                first_player,
            } => write!(
                f,
                "RoundStarted: players={}, top_card={}, first={}",
                players, top_card, first_player
            ),
            GameEvent::CardPlayed { seat, card } => {
                write!(f, "CardPlayed: seat={}, card={}", seat, card)
            }
            GameEvent::CardsDrawn { seat, count } => {
                write!(f, "CardsDrawn: seat={}, count={}", seat, count)
            }
            GameEvent::DirectionChanged { direction } => {
                write!(f, "DirectionChanged: {:?}", direction)
            }
            GameEvent::PlayerTurn { seat, pending_draw } => {
                write!(f, "PlayerTurn: seat={}, pending_draw={}", seat, pending_draw)
            }
            GameEvent::RoundOver { winner, scores } => {
                write!(f, "RoundOver: winner={}, scores={:?}", winner, scores)
            }
            GameEvent::Rejected { conn_id, reason } => {
                write!(f, "Rejected: conn={}, reason={}", conn_id, reason)
            }
        }
    }
}

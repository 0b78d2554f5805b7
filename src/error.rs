use thiserror::Error;

use crate::game::cards::{Card, Color, Rank};

/// Failures of the rule engine and the turn state machine.
///
/// None of these leave shared state half-mutated: every check runs before
/// the first write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("card {card} cannot be played on {top} (pending draw {pending})")]
    IllegalMove { card: Card, top: Card, pending: usize },

    #[error("card {rank} of {color} is not in the player's hand")]
    CardNotFound { rank: Rank, color: Color },

    #[error("discard pile is empty")]
    EmptyPile,

    #[error("invalid card: {color} cannot carry rank {rank}")]
    InvalidCard { color: Color, rank: Rank },

    #[error("a color must be chosen when playing {0}")]
    ColorNotChosen(Rank),

    #[error("no players registered")]
    NoPlayers,

    #[error("{seats} players cannot be dealt from one deck (at most {max})")]
    TooManyPlayers { seats: usize, max: usize },
}

/// Malformed frames, JSON, or enum values on the wire.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid message: {reason}")]
    Decode { reason: String },

    #[error("frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        ProtocolError::Decode {
            reason: reason.into(),
        }
    }
}

/// Outcome of a request handled by the session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("seat {seat} acted out of turn (current seat is {current})")]
    IllegalTurn { seat: usize, current: usize },

    #[error("seat {0} is not registered")]
    SeatNotFound(usize),

    #[error("connection {0} is not registered")]
    UnknownConnection(u64),

    #[error("connection {0} has not joined the game")]
    NotJoined(u64),

    #[error("connection {0} already holds a seat")]
    AlreadyJoined(u64),

    #[error("the table is full ({0} seats)")]
    TableFull(usize),

    #[error("the round has already started")]
    AlreadyStarted,

    #[error("the round has not started")]
    NotStarted,

    #[error("clients may not send {0}")]
    UnexpectedMessage(&'static str),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl SessionError {
    /// Integrity violations end the offending session instead of being
    /// answered with an `INVALID` envelope and ignored.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SessionError::SeatNotFound(_)
                | SessionError::UnknownConnection(_)
                | SessionError::Game(GameError::CardNotFound { .. })
        )
    }
}

/// Broadcasts the client mirror could not apply.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("local state diverged from the server: {0}")]
    Desync(#[from] GameError),

    #[error("the server rejected the last request")]
    Rejected,

    #[error("unexpected {0} from the server")]
    Unexpected(&'static str),
}

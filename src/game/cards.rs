use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::GameError;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "Red")]
    RED,
    #[serde(rename = "Yellow")]
    YELLOW,
    #[serde(rename = "Blue")]
    BLUE,
    #[serde(rename = "Green")]
    GREEN,
    /// Color of a wild card nobody has picked a color for yet.
    #[serde(rename = "Wild")]
    WILD,
}

impl Color {
    /// The four colors a player can name.
    pub const PLAYABLE: [Color; 4] = [Color::RED, Color::YELLOW, Color::BLUE, Color::GREEN];

    pub fn from_u8(val: u8) -> Option<Color> {
        Color::PLAYABLE.get(val as usize).copied()
    }

    pub fn is_wild(&self) -> bool {
        *self == Color::WILD
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Color::RED => "RED",
            Color::YELLOW => "YELLOW",
            Color::BLUE => "BLUE",
            Color::GREEN => "GREEN",
            Color::WILD => "WILD",
        };
        f.pad(s)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "0")]
    ZERO,
    #[serde(rename = "1")]
    ONE,
    #[serde(rename = "2")]
    TWO,
    #[serde(rename = "3")]
    THREE,
    #[serde(rename = "4")]
    FOUR,
    #[serde(rename = "5")]
    FIVE,
    #[serde(rename = "6")]
    SIX,
    #[serde(rename = "7")]
    SEVEN,
    #[serde(rename = "8")]
    EIGHT,
    #[serde(rename = "9")]
    NINE,
    #[serde(rename = "Skip")]
    SKIP,
    #[serde(rename = "Reverse")]
    REVERSE,
    #[serde(rename = "Draw 2")]
    DRAWTWO,
    #[serde(rename = "Wild")]
    WILD,
    #[serde(rename = "Wild Draw 4")]
    DRAWFOUR,
}

impl Rank {
    pub const ALL: [Rank; 15] = [
        Rank::ZERO,
        Rank::ONE,
        Rank::TWO,
        Rank::THREE,
        Rank::FOUR,
        Rank::FIVE,
        Rank::SIX,
        Rank::SEVEN,
        Rank::EIGHT,
        Rank::NINE,
        Rank::SKIP,
        Rank::REVERSE,
        Rank::DRAWTWO,
        Rank::WILD,
        Rank::DRAWFOUR,
    ];

    pub fn from_u8(val: u8) -> Option<Rank> {
        if val > 9 {
            return None;
        }
        Some(Rank::ALL[val as usize])
    }

    pub fn to_u8(&self) -> Option<u8> {
        if self.is_number() {
            Some(*self as u8)
        } else {
            None
        }
    }

    pub fn is_number(&self) -> bool {
        *self <= Rank::NINE
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Rank::WILD | Rank::DRAWFOUR)
    }

    /// Cards the next player is forced to draw when this rank is played.
    pub fn draw_penalty(&self) -> usize {
        match self {
            Rank::DRAWTWO => 2,
            Rank::DRAWFOUR => 4,
            _ => 0,
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_u8() {
            Some(n) => write!(f, "{}", n),
            None => {
                let s = match self {
                    Rank::SKIP => "SKIP",
                    Rank::REVERSE => "REVERSE",
                    Rank::DRAWTWO => "DRAWTWO",
                    Rank::WILD => "WILD",
                    _ => "DRAWFOUR",
                };
                f.pad(s)
            }
        }
    }
}

/// A single card. Ordered by `(color, rank)` so hands sort deterministically.
///
/// Wild ranks may carry a concrete color once one has been chosen for them;
/// every other rank must carry one of the four playable colors.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "WireCard", into = "WireCard")]
pub struct Card {
    color: Color,
    rank: Rank,
}

#[derive(Serialize, Deserialize)]
struct WireCard {
    card_color: Color,
    card_type: Rank,
}

impl TryFrom<WireCard> for Card {
    type Error = GameError;

    fn try_from(wire: WireCard) -> Result<Self, Self::Error> {
        Card::new(wire.card_color, wire.card_type)
    }
}

impl From<Card> for WireCard {
    fn from(card: Card) -> Self {
        WireCard {
            card_color: card.color,
            card_type: card.rank,
        }
    }
}

impl Card {
    pub fn new(color: Color, rank: Rank) -> Result<Card, GameError> {
        if color.is_wild() && !rank.is_wild() {
            return Err(GameError::InvalidCard { color, rank });
        }
        Ok(Card { color, rank })
    }

    /// A wild card with no color chosen yet.
    pub fn wild(rank: Rank) -> Result<Card, GameError> {
        Card::new(Color::WILD, rank)
    }

    pub(crate) fn colored(color: Color, rank: Rank) -> Card {
        debug_assert!(!color.is_wild());
        Card { color, rank }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn is_wild(&self) -> bool {
        self.rank.is_wild()
    }

    /// Substitutes the chosen color for a wild card's placeholder color.
    pub fn with_color(self, color: Option<Color>) -> Result<Card, GameError> {
        if !self.is_wild() {
            return Ok(self);
        }
        match color.filter(|c| !c.is_wild()) {
            Some(c) => Ok(Card { color: c, rank: self.rank }),
            None if !self.color.is_wild() => Ok(self),
            None => Err(GameError::ColorNotChosen(self.rank)),
        }
    }

    /// Strips a chosen color so the card can go back into a deck.
    pub fn uncolored(self) -> Card {
        if self.is_wild() {
            Card {
                color: Color::WILD,
                rank: self.rank,
            }
        } else {
            self
        }
    }

    pub fn points(&self) -> u32 {
        // Number cards count face value, action cards 20, wild cards 50.
        match self.rank.to_u8() {
            Some(n) => n as u32,
            None if self.is_wild() => 50,
            None => 20,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wild() && self.color.is_wild() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{} {}", self.color, self.rank)
        }
    }
}

/// Whether `card` may be played on `top` while `pending` cards are owed.
///
/// With a stack outstanding only another draw card continues it: a
/// `DRAWFOUR` always, a `DRAWTWO` only on top of a `DRAWTWO`.
pub fn is_playable(card: &Card, top: &Card, pending: usize) -> bool {
    if pending > 0 {
        return match card.rank {
            Rank::DRAWFOUR => true,
            Rank::DRAWTWO => top.rank == Rank::DRAWTWO,
            _ => false,
        };
    }
    if card.is_wild() {
        return true;
    }
    same_color(card, top) || same_rank(card, top)
}

fn same_color(card: &Card, top: &Card) -> bool {
    !top.color.is_wild() && card.color == top.color
}

fn same_rank(card: &Card, top: &Card) -> bool {
    card.rank == top.rank
}

use crate::error::GameError;
use crate::game::cards::{is_playable, Card, Color, Rank};
use crate::game::piles::DiscardPile;
use crate::game::player::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    FORWARD,
    REVERSED,
}

impl Direction {
    pub fn flipped(self) -> Direction {
        match self {
            Direction::FORWARD => Direction::REVERSED,
            Direction::REVERSED => Direction::FORWARD,
        }
    }
}

/// Rotation, direction, and the pending stacked draw, shared by the server
/// and the client mirror. `P` decides whether a seat holds real cards.
///
/// There is no explicit phase enum: legality follows entirely from
/// `(current, direction, pending_draw)` and the discard top.
#[derive(Debug, Clone)]
pub struct TurnState<P: PlayerRecord> {
    players: Vec<P>,
    current: usize,
    direction: Direction,
    pending_draw: usize,
    discard: DiscardPile,
}

impl<P: PlayerRecord> Default for TurnState<P> {
    fn default() -> Self {
        TurnState {
            players: Vec::new(),
            current: 0,
            direction: Direction::FORWARD,
            pending_draw: 0,
            discard: DiscardPile::new(),
        }
    }
}

impl<P: PlayerRecord> TurnState<P> {
    pub fn new() -> TurnState<P> {
        TurnState::default()
    }

    /// Rebuilds a state mid-round, as the client does from a snapshot.
    pub fn from_snapshot(players: Vec<P>, current: usize, discard: DiscardPile) -> TurnState<P> {
        let current = if players.is_empty() {
            0
        } else {
            current.min(players.len() - 1)
        };
        TurnState {
            players,
            current,
            direction: Direction::FORWARD,
            pending_draw: 0,
            discard,
        }
    }

    /// Registers a player and returns its seat index.
    pub fn add_player(&mut self, player: P) -> usize {
        self.players.push(player);
        self.players.len() - 1
    }

    pub fn players(&self) -> &[P] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&P> {
        self.players.get(seat)
    }

    pub(crate) fn player_mut(&mut self, seat: usize) -> Option<&mut P> {
        self.players.get_mut(seat)
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_draw(&self) -> usize {
        self.pending_draw
    }

    pub fn discard(&self) -> &DiscardPile {
        &self.discard
    }

    pub(crate) fn discard_mut(&mut self) -> &mut DiscardPile {
        &mut self.discard
    }

    /// How many cards the current player takes if they draw now.
    pub fn draw_obligation(&self) -> usize {
        if self.pending_draw > 0 {
            self.pending_draw
        } else {
            1
        }
    }

    pub fn advance(&mut self) {
        let n = self.players.len();
        if n == 0 {
            return;
        }
        self.current = match self.direction {
            Direction::FORWARD => (self.current + 1) % n,
            Direction::REVERSED => (self.current + n - 1) % n,
        };
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// Whether the current player could lay `card` right now.
    pub fn can_play(&self, card: &Card) -> bool {
        match self.discard.top() {
            Ok(top) => is_playable(card, &top, self.pending_draw),
            Err(_) => false,
        }
    }

    /// Plays `card` for the current player and returns the card as it lands
    /// on the discard pile (wilds carry `chosen`).
    ///
    /// Either the whole transition happens or nothing changes.
    pub fn apply_play(&mut self, card: Card, chosen: Option<Color>) -> Result<Card, GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let placed = card.with_color(chosen)?;
        let top = self.discard.top()?;
        if !is_playable(&placed, &top, self.pending_draw) {
            return Err(GameError::IllegalMove {
                card: placed,
                top,
                pending: self.pending_draw,
            });
        }
        self.players[self.current].play(&placed)?;

        self.pending_draw += placed.rank().draw_penalty();
        match placed.rank() {
            Rank::REVERSE => self.reverse(),
            Rank::SKIP => self.advance(),
            _ => {}
        }
        self.advance();
        self.discard.add(placed);
        Ok(placed)
    }

    /// Hands `count` cards to the current player, settles the stack, and
    /// passes the turn.
    pub fn resolve_draw(&mut self, count: usize, cards: Vec<Card>) -> Result<(), GameError> {
        let player = self
            .players
            .get_mut(self.current)
            .ok_or(GameError::NoPlayers)?;
        player.receive(count, cards);
        self.pending_draw = 0;
        self.advance();
        Ok(())
    }

    /// Empties hands and the discard pile but keeps every seat.
    pub fn reset_round(&mut self) {
        for player in &mut self.players {
            player.clear();
        }
        self.discard.clear();
        self.current = 0;
        self.direction = Direction::FORWARD;
        self.pending_draw = 0;
    }
}

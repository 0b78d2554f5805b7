use std::collections::HashMap;
use std::fmt::Display;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::game::cards::Card;
use crate::game::events::GameEvent;
use crate::game::piles::Deck;
use crate::game::uno_game::UnoGame;
use crate::ports::bus::EventBus;
use crate::protocol::{DrawCard, InitGame, JoinGame, Message, PlayCard};

pub type ConnId = u64;
pub type Outbox = mpsc::UnboundedSender<Message>;

/// The authoritative table. It owns the game, maps connections to seats,
/// validates every request and fans results out through per-connection
/// outboxes.
///
/// All methods run to completion without awaiting, so a single owner task
/// serializes every mutation.
pub struct SessionController {
    game: UnoGame,
    outboxes: HashMap<ConnId, Outbox>,
    conn_to_seat: HashMap<ConnId, usize>,
    seat_to_conn: Vec<ConnId>,
    ready: Vec<bool>,
    bus: EventBus,
}

impl SessionController {
    pub fn new(game: UnoGame, bus: EventBus) -> SessionController {
        SessionController {
            game,
            outboxes: HashMap::new(),
            conn_to_seat: HashMap::new(),
            seat_to_conn: Vec::new(),
            ready: Vec::new(),
            bus,
        }
    }

    pub fn from_config(config: &ServerConfig) -> SessionController {
        let deck = match config.seed {
            Some(seed) => Deck::seeded(seed),
            None => Deck::from_entropy(),
        };
        SessionController::new(
            UnoGame::new(deck, config.hand_size),
            EventBus::with_logger(),
        )
    }

    pub fn game(&self) -> &UnoGame {
        &self.game
    }

    pub fn seat_of(&self, conn_id: ConnId) -> Option<usize> {
        self.conn_to_seat.get(&conn_id).copied()
    }

    pub fn seat_count(&self) -> usize {
        self.seat_to_conn.len()
    }

    pub fn is_ready(&self, seat: usize) -> bool {
        self.ready.get(seat).copied().unwrap_or(false)
    }

    /// Registers the outbound queue of a freshly accepted connection.
    pub fn connect(&mut self, conn_id: ConnId, outbox: Outbox) {
        debug!(conn_id, "connection registered");
        self.outboxes.insert(conn_id, outbox);
    }

    /// Drops the connection's queue. A seat it held stays registered and
    /// simply stops receiving.
    pub fn disconnect(&mut self, conn_id: ConnId) {
        self.outboxes.remove(&conn_id);
        match self.seat_of(conn_id) {
            Some(seat) => info!(conn_id, seat, "connection closed, seat kept"),
            None => debug!(conn_id, "connection closed"),
        }
    }

    /// Validates and applies one request from `conn_id`.
    ///
    /// Every rejection is answered with an `INVALID` envelope to the sender
    /// only. Fatal errors also drop the sender's queue, which closes the
    /// connection once the queue drains.
    pub fn handle(&mut self, conn_id: ConnId, msg: Message) -> Result<(), SessionError> {
        let result = match msg {
            Message::JoinGame(JoinGame { name }) => self.on_join(conn_id, &name),
            Message::StartGame => self.on_ready_to_start(conn_id),
            Message::PlayCard(PlayCard { card }) => self.on_play_card(conn_id, card),
            Message::DrawCard(_) => self.on_draw_card(conn_id),
            other => Err(SessionError::UnexpectedMessage(other.payload_type().as_str())),
        };
        if let Err(e) = &result {
            self.reject(conn_id, e);
            if e.is_fatal() {
                warn!(conn_id, error = %e, "closing connection");
                self.outboxes.remove(&conn_id);
            }
        }
        result
    }

    /// Answers a request that could not be applied, or not even decoded.
    pub fn reject(&mut self, conn_id: ConnId, reason: &dyn Display) {
        if let Some(outbox) = self.outboxes.get(&conn_id) {
            if outbox.send(Message::invalid()).is_err() {
                debug!(conn_id, "outbox closed, rejection dropped");
            }
        }
        self.bus.publish([GameEvent::Rejected {
            conn_id,
            reason: reason.to_string(),
        }]);
    }

    fn on_join(&mut self, conn_id: ConnId, name: &str) -> Result<(), SessionError> {
        if !self.outboxes.contains_key(&conn_id) {
            return Err(SessionError::UnknownConnection(conn_id));
        }
        if self.conn_to_seat.contains_key(&conn_id) {
            return Err(SessionError::AlreadyJoined(conn_id));
        }
        if self.game.is_started() {
            return Err(SessionError::AlreadyStarted);
        }
        let limit = self.game.seat_limit();
        if self.seat_to_conn.len() >= limit {
            return Err(SessionError::TableFull(limit));
        }
        let seat = self.game.add_player(name);
        self.seat_to_conn.push(conn_id);
        self.conn_to_seat.insert(conn_id, seat);
        self.ready.push(false);
        self.bus.publish([GameEvent::PlayerJoined {
            seat,
            name: name.to_string(),
        }]);
        Ok(())
    }

    fn on_ready_to_start(&mut self, conn_id: ConnId) -> Result<(), SessionError> {
        let seat = self.joined_seat(conn_id)?;
        if self.game.is_started() {
            return Err(SessionError::AlreadyStarted);
        }
        self.ready[seat] = true;
        let ready = self.ready.iter().filter(|r| **r).count();
        self.bus.publish([GameEvent::PlayerReady {
            seat,
            ready,
            seats: self.ready.len(),
        }]);
        if ready == self.ready.len() {
            self.start_round()?;
        }
        Ok(())
    }

    fn start_round(&mut self) -> Result<(), SessionError> {
        let top_card = self.game.deal()?;
        let players = self.game.public_players();
        let discard_pile = self.game.turn().discard().top_first();
        let current_player = self.game.current_player();

        for seat in 0..self.seat_to_conn.len() {
            let hand_card = self
                .game
                .hand(seat)
                .map(|h| h.cards().to_vec())
                .ok_or(SessionError::SeatNotFound(seat))?;
            let init = InitGame {
                player_id: seat,
                players: players.clone(),
                discard_pile: discard_pile.clone(),
                hand_card,
                current_player,
            };
            self.send_to_seat(seat, Message::InitGame(init))?;
        }

        self.bus.publish([
            GameEvent::RoundStarted {
                players: players.len(),
                top_card,
                first_player: current_player,
            },
            GameEvent::PlayerTurn {
                seat: current_player,
                pending_draw: 0,
            },
        ]);
        Ok(())
    }

    fn on_play_card(&mut self, conn_id: ConnId, card: Card) -> Result<(), SessionError> {
        let seat = self.acting_seat(conn_id)?;
        let chosen = if card.is_wild() {
            Some(card.color())
        } else {
            None
        };
        let before = self.game.turn().direction();
        let placed = self.game.apply_play(card, chosen)?;

        self.broadcast(Message::play(placed))?;

        let mut events = vec![GameEvent::CardPlayed { seat, card: placed }];
        let direction = self.game.turn().direction();
        if direction != before {
            events.push(GameEvent::DirectionChanged { direction });
        }
        match self.game.winner() {
            Some(winner) => {
                self.bus.publish(events);
                self.finish_round(winner)?;
            }
            None => {
                events.push(self.turn_event());
                self.bus.publish(events);
            }
        }
        Ok(())
    }

    fn on_draw_card(&mut self, conn_id: ConnId) -> Result<(), SessionError> {
        let seat = self.acting_seat(conn_id)?;
        let cards = self.game.apply_draw()?;
        let count = cards.len();

        for other in 0..self.seat_to_conn.len() {
            let visible = if other == seat {
                cards.clone()
            } else {
                Vec::new()
            };
            let msg = Message::DrawCard(DrawCard {
                draw_count: count,
                cards: visible,
            });
            self.send_to_seat(other, msg)?;
        }

        self.bus
            .publish([GameEvent::CardsDrawn { seat, count }, self.turn_event()]);
        Ok(())
    }

    fn finish_round(&mut self, winner: usize) -> Result<(), SessionError> {
        self.broadcast(Message::EndGame)?;
        let scores = self.game.end_round();
        self.ready.iter_mut().for_each(|r| *r = false);
        self.bus.publish([GameEvent::RoundOver { winner, scores }]);
        Ok(())
    }

    fn turn_event(&self) -> GameEvent {
        GameEvent::PlayerTurn {
            seat: self.game.current_player(),
            pending_draw: self.game.turn().pending_draw(),
        }
    }

    fn joined_seat(&self, conn_id: ConnId) -> Result<usize, SessionError> {
        if !self.outboxes.contains_key(&conn_id) {
            return Err(SessionError::UnknownConnection(conn_id));
        }
        self.seat_of(conn_id).ok_or(SessionError::NotJoined(conn_id))
    }

    /// The sender's seat, provided the round is running and it is that
    /// seat's turn.
    fn acting_seat(&self, conn_id: ConnId) -> Result<usize, SessionError> {
        let seat = self.joined_seat(conn_id)?;
        if !self.game.is_started() {
            return Err(SessionError::NotStarted);
        }
        let current = self.game.current_player();
        if seat != current {
            return Err(SessionError::IllegalTurn { seat, current });
        }
        Ok(seat)
    }

    fn send_to_seat(&self, seat: usize, msg: Message) -> Result<(), SessionError> {
        let conn_id = *self
            .seat_to_conn
            .get(seat)
            .ok_or(SessionError::SeatNotFound(seat))?;
        match self.outboxes.get(&conn_id) {
            Some(outbox) => {
                if outbox.send(msg).is_err() {
                    debug!(seat, conn_id, "outbox closed, message dropped");
                }
            }
            None => debug!(seat, conn_id, "seat has no live connection"),
        }
        Ok(())
    }

    fn broadcast(&self, msg: Message) -> Result<(), SessionError> {
        for seat in 0..self.seat_to_conn.len() {
            self.send_to_seat(seat, msg.clone())?;
        }
        Ok(())
    }
}

use tracing::{debug, warn};

use crate::error::MirrorError;
use crate::game::cards::{Card, Color};
use crate::game::piles::{DiscardPile, Hand};
use crate::game::player::ClientPlayer;
use crate::game::turn::TurnState;
use crate::protocol::{DrawCard, InitGame, Message, PlayCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStage {
    PendingConnection,
    PreGame,
    /// In a round, waiting for another seat.
    Idle,
    /// In a round, our turn.
    Active,
}

/// A client's copy of the table, rebuilt from the `INIT_GAME` snapshot and
/// moved forward by replaying broadcasts through the same turn rules the
/// server runs. Only its own hand holds real cards.
pub struct ClientMirror {
    name: String,
    stage: ClientStage,
    seat: Option<usize>,
    hand: Hand,
    turn: TurnState<ClientPlayer>,
}

impl ClientMirror {
    pub fn new(name: &str) -> ClientMirror {
        ClientMirror {
            name: name.to_string(),
            stage: ClientStage::PendingConnection,
            seat: None,
            hand: Hand::new(),
            turn: TurnState::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> ClientStage {
        self.stage
    }

    pub fn seat(&self) -> Option<usize> {
        self.seat
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn turn(&self) -> &TurnState<ClientPlayer> {
        &self.turn
    }

    pub fn top_card(&self) -> Option<Card> {
        self.turn.discard().top().ok()
    }

    pub fn is_my_turn(&self) -> bool {
        self.stage == ClientStage::Active
    }

    /// The transport is up. Returns the `JOIN_GAME` to send.
    pub fn connected(&mut self) -> Message {
        self.stage = ClientStage::PreGame;
        self.join()
    }

    /// Applies one server message.
    pub fn apply(&mut self, msg: Message) -> Result<(), MirrorError> {
        match msg {
            Message::InitGame(init) => self.apply_init(init),
            Message::PlayCard(PlayCard { card }) => self.apply_play(card),
            Message::DrawCard(draw) => self.apply_draw(draw),
            Message::EndGame => {
                self.apply_end();
                Ok(())
            }
            Message::Empty => {
                warn!("server rejected the last request");
                Err(MirrorError::Rejected)
            }
            other => Err(MirrorError::Unexpected(other.payload_type().as_str())),
        }
    }

    fn apply_init(&mut self, init: InitGame) -> Result<(), MirrorError> {
        let players: Vec<ClientPlayer> = init.players.into_iter().map(ClientPlayer::from).collect();
        let discard = DiscardPile::from_top_first(init.discard_pile);
        self.turn = TurnState::from_snapshot(players, init.current_player, discard);
        self.hand.clear();
        self.hand.extend(init.hand_card);
        self.seat = Some(init.player_id);
        debug!(seat = init.player_id, cards = self.hand.len(), "round snapshot applied");
        self.refresh_stage();
        Ok(())
    }

    fn apply_play(&mut self, card: Card) -> Result<(), MirrorError> {
        self.ensure_in_round("PLAY_CARD")?;
        // Our own card leaves the hand first so a desynced hand fails
        // before the table moves.
        let taken = if self.is_my_turn() {
            Some(self.hand.play_matching(card.rank(), card.color())?)
        } else {
            None
        };
        if let Err(e) = self.turn.apply_play(card, None) {
            if let Some(back) = taken {
                self.hand.insert(back);
            }
            return Err(e.into());
        }
        self.refresh_stage();
        Ok(())
    }

    fn apply_draw(&mut self, draw: DrawCard) -> Result<(), MirrorError> {
        self.ensure_in_round("DRAW_CARD")?;
        if self.is_my_turn() {
            self.hand.extend(draw.cards);
        }
        self.turn.resolve_draw(draw.draw_count, Vec::new())?;
        self.refresh_stage();
        Ok(())
    }

    fn apply_end(&mut self) {
        self.turn.reset_round();
        self.hand.clear();
        self.stage = ClientStage::PreGame;
    }

    fn ensure_in_round(&self, what: &'static str) -> Result<(), MirrorError> {
        match self.stage {
            ClientStage::Idle | ClientStage::Active => Ok(()),
            _ => Err(MirrorError::Unexpected(what)),
        }
    }

    fn refresh_stage(&mut self) {
        self.stage = if self.seat == Some(self.turn.current_player()) {
            ClientStage::Active
        } else {
            ClientStage::Idle
        };
    }

    /// Indices into `hand()` of the cards that could be played right now.
    pub fn playable_cards(&self) -> Vec<usize> {
        if !self.is_my_turn() {
            return Vec::new();
        }
        self.hand
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, c)| self.turn.can_play(c))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn join(&self) -> Message {
        Message::join(&self.name)
    }

    pub fn start(&self) -> Message {
        Message::StartGame
    }

    /// `PLAY_CARD` for the card at `index`; wilds need `color`.
    pub fn play(&self, index: usize, color: Option<Color>) -> Option<Message> {
        let card = self.hand.get(index)?.with_color(color).ok()?;
        Some(Message::play(card))
    }

    pub fn draw(&self) -> Message {
        Message::draw(self.turn.draw_obligation(), Vec::new())
    }
}

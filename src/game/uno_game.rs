use crate::error::GameError;
use crate::game::cards::{Card, Color};
use crate::game::piles::{Deck, Hand, DECK_SIZE};
use crate::game::player::{PlayerRecord, PublicPlayerState, ServerPlayer};
use crate::game::turn::TurnState;

pub const DEFAULT_HAND_SIZE: usize = 7;
pub const MAX_SEATS: usize = 10;

/// The authoritative game: the turn state with real hands, plus the deck.
pub struct UnoGame {
    turn: TurnState<ServerPlayer>,
    deck: Deck,
    hand_size: usize,
    started: bool,
}

impl UnoGame {
    pub fn new(deck: Deck, hand_size: usize) -> UnoGame {
        UnoGame {
            turn: TurnState::new(),
            deck,
            hand_size,
            started: false,
        }
    }

    pub fn seeded(seed: u64) -> UnoGame {
        UnoGame::new(Deck::seeded(seed), DEFAULT_HAND_SIZE)
    }

    pub fn add_player(&mut self, name: &str) -> usize {
        self.turn.add_player(ServerPlayer::new(name))
    }

    /// Most seats a single deck can deal to, keeping one card back for the
    /// discard pile.
    pub fn seat_limit(&self) -> usize {
        MAX_SEATS.min((DECK_SIZE - 1) / self.hand_size.max(1))
    }

    pub fn turn(&self) -> &TurnState<ServerPlayer> {
        &self.turn
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn current_player(&self) -> usize {
        self.turn.current_player()
    }

    pub fn hand(&self, seat: usize) -> Option<&Hand> {
        self.turn.player(seat).map(|p| p.hand())
    }

    pub fn public_players(&self) -> Vec<PublicPlayerState> {
        self.turn.players().iter().map(|p| p.public_state()).collect()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Every card currently in play: hands, deck, and discard pile.
    pub fn cards_in_play(&self) -> usize {
        let in_hands: usize = self.turn.players().iter().map(|p| p.hand_size()).sum();
        in_hands + self.deck.len() + self.turn.discard().len()
    }

    /// Shuffles a new deck, deals round-robin, and turns up discards until
    /// the top is a number card. Returns the top card.
    pub fn deal(&mut self) -> Result<Card, GameError> {
        let seats = self.turn.players().len();
        if seats == 0 {
            return Err(GameError::NoPlayers);
        }
        if seats > self.seat_limit() {
            return Err(GameError::TooManyPlayers {
                seats,
                max: self.seat_limit(),
            });
        }
        self.turn.reset_round();
        self.deck.reset();

        for _ in 0..self.hand_size {
            for seat in 0..seats {
                let cards = self.deck.draw(1, self.turn.discard_mut());
                if let Some(player) = self.turn.player_mut(seat) {
                    player.receive(cards.len(), cards);
                }
            }
        }

        // Recycling can cycle through the same action cards forever when
        // hands hold every number card, so the turn-up is bounded.
        let mut top = None;
        for _ in 0..DECK_SIZE {
            let card = self
                .deck
                .draw_one(self.turn.discard_mut())
                .ok_or(GameError::EmptyPile)?;
            self.turn.discard_mut().add(card);
            if card.rank().is_number() {
                top = Some(card);
                break;
            }
        }
        let top = top.ok_or(GameError::EmptyPile)?;
        self.started = true;
        Ok(top)
    }

    pub fn apply_play(&mut self, card: Card, chosen: Option<Color>) -> Result<Card, GameError> {
        self.turn.apply_play(card, chosen)
    }

    /// Draws the pending stack (or one card) for the current player and
    /// returns the cards drawn. Fewer come back only when every other card
    /// is already in a hand; the stack is settled either way.
    pub fn apply_draw(&mut self) -> Result<Vec<Card>, GameError> {
        if self.turn.players().is_empty() {
            return Err(GameError::NoPlayers);
        }
        let n = self.turn.draw_obligation();
        let cards = self.deck.draw(n, self.turn.discard_mut());
        self.turn.resolve_draw(cards.len(), cards.clone())?;
        Ok(cards)
    }

    /// The seat that has emptied its hand, if the round is over.
    pub fn winner(&self) -> Option<usize> {
        if !self.started {
            return None;
        }
        self.turn.players().iter().position(|p| p.hand_size() == 0)
    }

    /// Scores the round and clears hands, piles and deck. Seats survive.
    pub fn end_round(&mut self) -> Vec<(String, u32)> {
        let scores = self.calculate_scores();
        self.turn.reset_round();
        self.deck.clear();
        self.started = false;
        scores
    }

    fn calculate_scores(&self) -> Vec<(String, u32)> {
        // Points left in hand count against a player, lowest is best.
        let mut scores: Vec<(String, u32)> = self
            .turn
            .players()
            .iter()
            .map(|p| {
                let points = p.hand().cards().iter().map(|c| c.points()).sum();
                (p.name().to_string(), points)
            })
            .collect();
        scores.sort_by(|a, b| a.1.cmp(&b.1));
        scores
    }
}

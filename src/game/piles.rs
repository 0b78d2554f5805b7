use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::GameError;
use crate::game::cards::{Card, Color, Rank};

pub const DECK_SIZE: usize = 108;

/// The standard 108 card UNO deck, unshuffled.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for color in Color::PLAYABLE {
        // One zero per color, two of everything else
        cards.push(Card::colored(color, Rank::ZERO));
        for _ in 0..2 {
            for number in 1..10 {
                if let Some(rank) = Rank::from_u8(number) {
                    cards.push(Card::colored(color, rank));
                }
            }
            cards.push(Card::colored(color, Rank::SKIP));
            cards.push(Card::colored(color, Rank::REVERSE));
            cards.push(Card::colored(color, Rank::DRAWTWO));
        }
    }
    for _ in 0..4 {
        cards.extend(Card::wild(Rank::WILD));
        cards.extend(Card::wild(Rank::DRAWFOUR));
    }
    cards
}

/// Face-down draw pile. Owns the random source used for every shuffle.
pub struct Deck {
    cards: VecDeque<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// A full, shuffled deck whose shuffles are reproducible from `seed`.
    pub fn seeded(seed: u64) -> Deck {
        Deck::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Deck {
        Deck::with_rng(ChaCha8Rng::from_entropy())
    }

    fn with_rng(rng: ChaCha8Rng) -> Deck {
        let mut deck = Deck {
            cards: VecDeque::new(),
            rng,
        };
        deck.reset();
        deck
    }

    /// Replaces the contents with a freshly shuffled standard deck.
    pub fn reset(&mut self) {
        let mut cards = standard_deck();
        cards.shuffle(&mut self.rng);
        self.cards = cards.into();
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draws up to `n` cards from the front. An empty deck is refilled
    /// from `discard` first; the draw comes up short only when every card
    /// but the discard top is already in a hand.
    pub fn draw(&mut self, n: usize, discard: &mut DiscardPile) -> Vec<Card> {
        let mut cards = Vec::with_capacity(n);
        while cards.len() < n {
            match self.draw_one(discard) {
                Some(card) => cards.push(card),
                None => {
                    tracing::warn!(wanted = n, got = cards.len(), "no cards left to draw");
                    break;
                }
            }
        }
        cards
    }

    pub fn draw_one(&mut self, discard: &mut DiscardPile) -> Option<Card> {
        if self.cards.is_empty() {
            self.refill(discard);
        }
        self.cards.pop_front()
    }

    /// Shuffles everything under the discard top back into the deck.
    fn refill(&mut self, discard: &mut DiscardPile) {
        let mut recycled: Vec<Card> = discard
            .take_under_top()
            .into_iter()
            .map(Card::uncolored)
            .collect();
        if recycled.is_empty() {
            return;
        }
        recycled.shuffle(&mut self.rng);
        tracing::debug!(cards = recycled.len(), "reshuffled discard pile into deck");
        self.cards.extend(recycled);
    }
}

/// Played cards; the last one added is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> DiscardPile {
        DiscardPile::default()
    }

    /// Rebuilds a pile from a top-first listing.
    pub fn from_top_first(cards: Vec<Card>) -> DiscardPile {
        let mut cards = cards;
        cards.reverse();
        DiscardPile { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn top(&self) -> Result<Card, GameError> {
        self.cards.last().copied().ok_or(GameError::EmptyPile)
    }

    /// Cards from the top down.
    pub fn top_first(&self) -> Vec<Card> {
        self.cards.iter().rev().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    fn take_under_top(&mut self) -> Vec<Card> {
        match self.cards.pop() {
            Some(top) => {
                let under = std::mem::take(&mut self.cards);
                self.cards.push(top);
                under
            }
            None => Vec::new(),
        }
    }
}

/// A player's cards, kept sorted so lookups pick the same card every time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand::default()
    }

    pub fn insert(&mut self, card: Card) {
        let at = self.cards.partition_point(|c| *c <= card);
        self.cards.insert(at, card);
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.insert(card);
        }
    }

    /// Removes the first card of `rank` whose color matches. Color is
    /// ignored for wild ranks since their color is picked on play.
    pub fn play_matching(&mut self, rank: Rank, color: Color) -> Result<Card, GameError> {
        let idx = self
            .cards
            .iter()
            .position(|c| c.rank() == rank && (rank.is_wild() || c.color() == color))
            .ok_or(GameError::CardNotFound { rank, color })?;
        Ok(self.cards.remove(idx))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, idx: usize) -> Option<&Card> {
        self.cards.get(idx)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

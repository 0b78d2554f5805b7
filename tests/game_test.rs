use proptest::prelude::*;
use uno_net::error::GameError;
use uno_net::game::piles::DECK_SIZE;
use uno_net::game::*;

fn card(color: Color, rank: Rank) -> Card {
    Card::new(color, rank).unwrap()
}

fn counting_table(n: usize, top: Card) -> TurnState<ClientPlayer> {
    let players = (0..n)
        .map(|i| ClientPlayer::new(&format!("p{}", i), 7, false))
        .collect();
    let mut discard = DiscardPile::new();
    discard.add(top);
    TurnState::from_snapshot(players, 0, discard)
}

/// A two seat deal where seat 0 holds a DRAWTWO in the top's color and
/// seat 1 holds nothing that can answer it.
fn stacking_deal() -> (u64, Card) {
    (0u64..2000)
        .find_map(|seed| {
            let mut game = UnoGame::seeded(seed);
            game.add_player("Alice");
            game.add_player("Bob");
            let top = game.deal().ok()?;
            let attack = card(top.color(), Rank::DRAWTWO);
            let a_has = game.hand(0)?.cards().contains(&attack);
            let b_clean = game
                .hand(1)?
                .cards()
                .iter()
                .all(|c| c.rank().draw_penalty() == 0);
            (a_has && b_clean).then_some((seed, attack))
        })
        .expect("some seed deals the stacking scenario")
}

/// Plays the first legal card, or draws. A seat that `holds_back` draws
/// even when it could play. Wilds are called red.
fn step(game: &mut UnoGame, holds_back: bool) {
    let seat = game.current_player();
    let pick = game
        .hand(seat)
        .and_then(|h| h.cards().iter().copied().find(|c| game.turn().can_play(c)));
    match pick {
        Some(c) if !holds_back => {
            game.apply_play(c, Some(Color::RED)).unwrap();
        }
        _ => {
            game.apply_draw().unwrap();
        }
    }
}

#[cfg(test)]
mod game_test {
    use super::*;

    #[test]
    fn test_forward_rotation_returns_home() {
        let mut t = counting_table(4, card(Color::RED, Rank::FIVE));
        for _ in 0..4 {
            t.advance();
        }
        assert_eq!(t.current_player(), 0);
        t.advance();
        assert_eq!(t.current_player(), 1);
    }

    #[test]
    fn test_reverse_moves_to_previous_seat() {
        let mut t = counting_table(4, card(Color::RED, Rank::FIVE));
        t.advance();
        t.reverse();
        t.advance();
        assert_eq!(t.current_player(), 0);
        assert_eq!(t.direction(), Direction::REVERSED);
    }

    #[test]
    fn test_reverse_card_turns_play_around() {
        let mut t = counting_table(4, card(Color::RED, Rank::FIVE));
        t.apply_play(card(Color::RED, Rank::REVERSE), None).unwrap();
        assert_eq!(t.direction(), Direction::REVERSED);
        assert_eq!(t.current_player(), 3);
    }

    #[test]
    fn test_stack_accumulates_and_resolves() {
        let mut t = counting_table(3, card(Color::RED, Rank::FIVE));
        t.apply_play(card(Color::RED, Rank::DRAWTWO), None).unwrap();
        t.apply_play(card(Color::BLUE, Rank::DRAWTWO), None).unwrap();
        t.apply_play(Card::wild(Rank::DRAWFOUR).unwrap(), Some(Color::GREEN))
            .unwrap();
        assert_eq!(t.pending_draw(), 8);
        assert_eq!(t.draw_obligation(), 8);
        assert_eq!(t.current_player(), 0);

        t.resolve_draw(8, Vec::new()).unwrap();
        assert_eq!(t.players()[0].hand_size(), 6 + 8);
        assert_eq!(t.pending_draw(), 0);
        assert_eq!(t.current_player(), 1);
    }

    #[test]
    fn test_wild_needs_a_color() {
        let mut t = counting_table(2, card(Color::RED, Rank::FIVE));
        let err = t
            .apply_play(Card::wild(Rank::WILD).unwrap(), None)
            .unwrap_err();
        assert_eq!(err, GameError::ColorNotChosen(Rank::WILD));
        assert_eq!(t.players()[0].hand_size(), 7);

        let placed = t
            .apply_play(Card::wild(Rank::WILD).unwrap(), Some(Color::BLUE))
            .unwrap();
        assert_eq!(placed.color(), Color::BLUE);
        assert_eq!(t.discard().top().unwrap(), placed);
    }

    #[test]
    fn test_deal() {
        let mut game = UnoGame::seeded(11);
        assert_eq!(game.deal(), Err(GameError::NoPlayers));
        for name in ["Alice", "Bob", "Charlie"] {
            game.add_player(name);
        }
        let top = game.deal().unwrap();
        assert!(top.rank().is_number());
        assert_eq!(game.turn().discard().top().unwrap(), top);
        for seat in 0..3 {
            assert_eq!(game.hand(seat).unwrap().len(), 7);
        }
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.cards_in_play(), DECK_SIZE);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let deal = |seed| {
            let mut game = UnoGame::seeded(seed);
            game.add_player("a");
            game.add_player("b");
            let top = game.deal().unwrap();
            (top, game.hand(0).unwrap().clone())
        };
        assert_eq!(deal(5), deal(5));
    }

    #[test]
    fn test_draw_two_scenario() {
        let (seed, attack) = stacking_deal();
        let mut game = UnoGame::seeded(seed);
        game.add_player("Alice");
        game.add_player("Bob");
        game.deal().unwrap();

        game.apply_play(attack, None).unwrap();
        assert_eq!(game.turn().pending_draw(), 2);
        assert_eq!(game.current_player(), 1);

        let answers = game
            .hand(1)
            .unwrap()
            .cards()
            .iter()
            .filter(|c| game.turn().can_play(c))
            .count();
        assert_eq!(answers, 0);

        let drawn = game.apply_draw().unwrap();
        assert_eq!(drawn.len(), 2);
        assert_eq!(game.hand(1).unwrap().len(), 9);
        assert_eq!(game.turn().pending_draw(), 0);
        assert_eq!(game.current_player(), 0);
    }

    #[test]
    fn test_end_round_keeps_seats() {
        let mut game = UnoGame::seeded(3);
        game.add_player("Alice");
        game.add_player("Bob");
        game.deal().unwrap();
        let scores = game.end_round();
        assert_eq!(scores.len(), 2);
        assert!(!game.is_started());
        assert_eq!(game.turn().players().len(), 2);
        assert_eq!(game.cards_in_play(), 0);
        assert!(game.deal().is_ok());
    }

    #[test]
    fn test_drawing_past_the_deck_keeps_every_card() {
        let mut game = UnoGame::seeded(3);
        game.add_player("Alice");
        game.add_player("Bob");
        game.deal().unwrap();
        for _ in 0..100 {
            game.apply_draw().unwrap();
            assert_eq!(game.cards_in_play(), DECK_SIZE);
        }
        let held = game.hand(0).unwrap().len() + game.hand(1).unwrap().len();
        assert_eq!(held, DECK_SIZE - 1);
        assert_eq!(game.deck_len(), 0);
        assert_eq!(game.turn().discard().len(), 1);

        // nothing left to hand out, the turn still passes
        let seat = game.current_player();
        assert!(game.apply_draw().unwrap().is_empty());
        assert_ne!(game.current_player(), seat);
        assert_eq!(game.cards_in_play(), DECK_SIZE);
    }

    #[test]
    fn test_deal_refuses_more_seats_than_the_deck_covers() {
        let mut game = UnoGame::seeded(1);
        for i in 0..16 {
            game.add_player(&format!("p{}", i));
        }
        assert_eq!(game.seat_limit(), 10);
        assert_eq!(
            game.deal(),
            Err(GameError::TooManyPlayers { seats: 16, max: 10 })
        );
        assert!(!game.is_started());
        assert_eq!(game.deck_len(), DECK_SIZE);
        assert!(game.hand(0).unwrap().is_empty());

        let mut wide = UnoGame::new(Deck::seeded(1), 15);
        assert_eq!(wide.seat_limit(), 7);
        for i in 0..7 {
            wide.add_player(&format!("p{}", i));
        }
        if wide.deal().is_ok() {
            assert_eq!(wide.cards_in_play(), DECK_SIZE);
        }
    }

    #[test]
    fn test_full_table_deal_conserves_cards() {
        let mut game = UnoGame::seeded(8);
        for i in 0..game.seat_limit() {
            game.add_player(&format!("p{}", i));
        }
        game.deal().unwrap();
        assert_eq!(game.cards_in_play(), DECK_SIZE);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn cards_are_conserved(
            seed in any::<u64>(),
            seats in 2usize..=10,
            holds_back in prop::collection::vec(any::<bool>(), 50..400),
        ) {
            let mut game = UnoGame::seeded(seed);
            for i in 0..seats {
                game.add_player(&format!("p{}", i));
            }
            game.deal().unwrap();
            prop_assert_eq!(game.cards_in_play(), DECK_SIZE);
            for draw in holds_back {
                if game.winner().is_some() {
                    break;
                }
                step(&mut game, draw);
                prop_assert_eq!(game.cards_in_play(), DECK_SIZE);
            }
        }

        #[test]
        fn draw_takes_exactly_the_pending_count(seed in any::<u64>()) {
            let mut game = UnoGame::seeded(seed);
            game.add_player("a");
            game.add_player("b");
            game.deal().unwrap();
            for _ in 0..200 {
                if game.winner().is_some() {
                    break;
                }
                let seat = game.current_player();
                let owed = game.turn().draw_obligation();
                // every card but the discard top can be handed out
                let spare = game.deck_len() + game.turn().discard().len() - 1;
                let before = game.hand(seat).unwrap().len();
                let must_draw = game
                    .hand(seat)
                    .unwrap()
                    .cards()
                    .iter()
                    .all(|c| !game.turn().can_play(c));
                step(&mut game, false);
                if must_draw {
                    prop_assert_eq!(game.hand(seat).unwrap().len(), before + owed.min(spare));
                    prop_assert_eq!(game.turn().pending_draw(), 0);
                }
            }
        }
    }
}

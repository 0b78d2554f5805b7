use uno_net::error::GameError;
use uno_net::game::*;

fn card(color: Color, rank: Rank) -> Card {
    Card::new(color, rank).unwrap()
}

#[cfg(test)]
mod player_test {
    use super::*;

    #[test]
    fn test_hand_stays_sorted() {
        let mut hand = Hand::new();
        hand.extend([
            card(Color::GREEN, Rank::ONE),
            card(Color::RED, Rank::NINE),
            card(Color::RED, Rank::TWO),
        ]);
        assert_eq!(
            hand.cards(),
            &[
                card(Color::RED, Rank::TWO),
                card(Color::RED, Rank::NINE),
                card(Color::GREEN, Rank::ONE),
            ]
        );
    }

    #[test]
    fn test_play_matching_removes_one_copy() {
        let mut hand = Hand::new();
        let seven = card(Color::BLUE, Rank::SEVEN);
        hand.extend([seven, seven]);
        assert_eq!(hand.play_matching(Rank::SEVEN, Color::BLUE), Ok(seven));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_play_matching_ignores_wild_color() {
        let mut hand = Hand::new();
        hand.insert(Card::wild(Rank::DRAWFOUR).unwrap());
        let played = hand.play_matching(Rank::DRAWFOUR, Color::YELLOW).unwrap();
        assert_eq!(played.rank(), Rank::DRAWFOUR);
        assert!(hand.is_empty());
    }

    #[test]
    fn test_missing_card_leaves_hand_alone() {
        let mut hand = Hand::new();
        hand.insert(card(Color::RED, Rank::FIVE));
        let err = hand.play_matching(Rank::FIVE, Color::BLUE).unwrap_err();
        assert_eq!(
            err,
            GameError::CardNotFound {
                rank: Rank::FIVE,
                color: Color::BLUE
            }
        );
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_server_player_uno_flag() {
        let mut player = ServerPlayer::new("Alice");
        let red = card(Color::RED, Rank::ONE);
        let blue = card(Color::BLUE, Rank::ONE);
        player.receive(2, vec![red, blue]);
        assert!(!player.is_uno());

        player.play(&red).unwrap();
        assert!(player.is_uno());
        assert_eq!(player.public_state().remaining_card_count, 1);

        player.receive(1, vec![red]);
        assert!(!player.is_uno());
    }

    #[test]
    fn test_client_player_counts_only() {
        let mut player = ClientPlayer::from(PublicPlayerState {
            name: "Bob".into(),
            remaining_card_count: 2,
            is_uno: false,
        });
        let any = card(Color::GREEN, Rank::SKIP);
        player.play(&any).unwrap();
        assert_eq!(player.hand_size(), 1);
        assert!(player.is_uno());
        player.play(&any).unwrap();
        assert!(player.play(&any).is_err());
        player.receive(3, Vec::new());
        assert_eq!(player.hand_size(), 3);
    }
}

use chrono::Utc;
use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::game::{Game, GameState};
use holdem_engine::options::GameOptions;
use holdem_engine::player::PlayerId;

#[test]
fn busting_the_last_opponent_ends_the_game() {
    let mut game = Game::new(GameOptions {
        buy_in: 100,
        raise_delay: 0,
        seed: Some(3),
        ..GameOptions::default()
    });
    game.open("ann".into()).unwrap();
    game.add_player("ben".into()).unwrap();
    game.start().unwrap();

    let deck = Deck::stacked(parse_cards("As Ad 7c 2h Ks 9d 4c 3h Jc").unwrap());
    game.deal_with_deck(deck, Utc::now()).unwrap();

    let msg = game.all_in().unwrap();
    assert!(msg.starts_with("ann raises by $90.\nann is all in!"));
    // facing a bet that covers ben's stack, the all-in is a call
    let msg = game.all_in().unwrap();
    assert!(msg.starts_with("ben calls.\nben is all in!"));
    assert!(msg.contains("ann wins $200 with a pair."));
    assert!(msg.contains("ben has been knocked out of the game!"));
    assert!(msg.ends_with("ann wins the game!\nCongratulations!"));

    assert_eq!(game.state(), GameState::NoGame);
    assert_eq!(game.winner(), Some(&PlayerId::from("ann")));
    assert_eq!(game.players().len(), 1);
    assert_eq!(game.players()[0].balance(), 200);
    assert!(game.current_player().is_none());
    assert!(game.all_in().is_err());

    // a finished table can be reopened
    game.open("ben".into()).unwrap();
    assert_eq!(game.state(), GameState::Waiting);
    assert_eq!(game.winner(), None);
}

#[test]
fn chips_are_conserved_across_random_hands() {
    let mut game = Game::new(GameOptions {
        raise_delay: 0,
        seed: Some(99),
        ..GameOptions::default()
    });
    game.open("p0".into()).unwrap();
    for name in ["p1", "p2", "p3"] {
        game.add_player(name.into()).unwrap();
    }
    game.start().unwrap();

    for hand in 0..20 {
        if game.state() != GameState::NoHands {
            break;
        }
        game.deal_hands().unwrap();
        let mut steps = 0;
        while game.state().is_betting() {
            // alternate pressure so hands reach showdown and side pots
            let result = if (hand + steps) % 3 == 0 {
                game.all_in()
            } else {
                game.call()
            };
            result.unwrap();
            steps += 1;
            assert!(steps < 100, "hand {hand} did not terminate");
        }
        let total: u32 = game.players().iter().map(|p| p.balance()).sum();
        assert_eq!(total, 2000, "chips leaked after hand {hand}");
    }
}

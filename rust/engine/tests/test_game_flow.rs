use chrono::Utc;
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Game, GameState};
use holdem_engine::options::{GameOptions, OptionKey, MAX_BUY_IN, MAX_SEATS};
use holdem_engine::player::{PlayerAction, PlayerId, PlayerStatus};

fn table(names: &[&str]) -> Game {
    let mut game = Game::new(GameOptions {
        raise_delay: 0,
        seed: Some(1),
        ..GameOptions::default()
    });
    game.open(names[0].into()).unwrap();
    for name in &names[1..] {
        assert!(game.add_player((*name).into()).unwrap());
    }
    game.start().unwrap();
    game
}

fn balances(game: &Game) -> Vec<u32> {
    game.players().iter().map(|p| p.balance()).collect()
}

fn turn(game: &Game) -> &str {
    game.current_player().expect("betting in progress").name()
}

#[test]
fn lifecycle_guards() {
    let mut game = Game::new(GameOptions::default());
    assert_eq!(game.state(), GameState::NoGame);
    assert!(matches!(game.start(), Err(GameError::WrongState { .. })));
    assert!(matches!(
        game.add_player("x".into()),
        Err(GameError::WrongState { .. })
    ));

    let msg = game.open("alice".into()).unwrap();
    assert_eq!(msg, "A new game has been started by alice!");
    assert_eq!(game.state(), GameState::Waiting);
    assert!(!game.add_player("alice".into()).unwrap(), "already seated");
    assert!(game.is_player(&"alice".into()));
    assert!(matches!(
        game.open("bob".into()),
        Err(GameError::WrongState { .. })
    ));
    assert!(matches!(
        game.deal_hands(),
        Err(GameError::WrongState { .. })
    ));

    game.add_player("bob".into()).unwrap();
    let msg = game.start().unwrap();
    assert!(msg.starts_with("The game has begun!\n"));
    assert!(msg.contains("alice has $500.\nbob has $500.\n"));
    assert!(msg.ends_with("alice is the current dealer.\nThe dealer deals when ready."));
    assert_eq!(game.state(), GameState::NoHands);
}

#[test]
fn three_handed_blinds_and_first_turn() {
    let mut game = table(&["alice", "bob", "carol"]);
    let msg = game.deal_hands().unwrap();
    assert!(msg.contains("bob has paid the small blind of $5."));
    assert!(msg.contains("carol has paid the big blind of $10."));
    assert_eq!(balances(&game), vec![500, 495, 490]);
    assert_eq!(game.pot().value(), 15);
    assert_eq!(game.cur_bet(), 10);
    assert_eq!(game.turn_index(), 0);
    assert_eq!(game.first_bettor(), 1);
    assert!(msg.ends_with("Options: call, raise or fold."));
    for p in game.players() {
        assert!(p.hole_cards().is_some());
    }
}

#[test]
fn heads_up_dealer_posts_small_blind_and_acts_first() {
    let mut game = table(&["alice", "bob"]);
    game.deal_hands().unwrap();
    assert_eq!(balances(&game), vec![495, 490]);
    assert_eq!(turn(&game), "alice");

    game.call().unwrap();
    assert_eq!(turn(&game), "bob");
    let msg = game.check().unwrap();
    assert!(msg.contains("Dealing the flop:"));
    assert_eq!(game.state(), GameState::FlopDealt);
    assert_eq!(game.shared_cards().len(), 3);
    assert_eq!(turn(&game), "bob", "non-dealer acts first after the flop");
    assert_eq!(game.cur_bet(), 0);
}

#[test]
fn uncontested_pot_goes_to_last_player() {
    let mut game = table(&["alice", "bob", "carol"]);
    game.deal_hands().unwrap();
    let msg = game.fold().unwrap();
    assert!(msg.starts_with("alice has folded."));
    assert_eq!(turn(&game), "bob");
    let msg = game.fold().unwrap();
    assert!(msg.contains("carol wins $15!"));
    assert_eq!(balances(&game), vec![500, 495, 505]);
    assert_eq!(game.state(), GameState::NoHands);
    assert_eq!(game.dealer_index(), 1);
    assert_eq!(game.dealer().unwrap().name(), "bob");
    assert!(game.players().iter().all(|p| p.hole_cards().is_none()));
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

#[test]
fn checked_down_hand_pays_best_hand() {
    let mut game = table(&["alice", "bob", "carol"]);
    let deck = Deck::stacked(cards("2c 7d 3s 8h Kc Kd Qs 9c 4d Jh 5s"));
    game.deal_with_deck(deck, Utc::now()).unwrap();
    assert_eq!(game.hole_cards(&"carol".into()), Some([cards("Kc")[0], cards("Kd")[0]]));

    game.call().unwrap(); // alice
    game.call().unwrap(); // bob completes the small blind
    let msg = game.check().unwrap(); // carol's option
    assert!(msg.contains("Dealing the flop:"));
    assert_eq!(turn(&game), "bob");

    for street in ["Dealing the turn:", "Dealing the river:"] {
        game.check().unwrap();
        game.check().unwrap();
        let msg = game.check().unwrap();
        assert!(msg.contains(street), "expected {street} in {msg}");
    }
    assert_eq!(game.shared_cards(), cards("Qs 9c 4d Jh 5s").as_slice());

    game.check().unwrap();
    game.check().unwrap();
    let msg = game.check().unwrap();
    assert!(msg.contains("We have reached the end of betting."));
    assert!(msg.contains("carol wins $30 with a pair."));
    assert_eq!(balances(&game), vec![490, 490, 520]);
    assert_eq!(game.state(), GameState::NoHands);
    assert_eq!(game.hands_played(), 1);
}

#[test]
fn actions_are_refused_out_of_turn() {
    let mut game = table(&["alice", "bob", "carol"]);
    game.deal_hands().unwrap();

    let err = game
        .act_as(&PlayerId::from("bob"), PlayerAction::Check)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::NotPlayersTurn {
            expected: "alice".into(),
            actual: "bob".into()
        }
    );
    assert!(matches!(
        game.act_as(&"mallory".into(), PlayerAction::Fold),
        Err(GameError::UnknownPlayer(_))
    ));
    assert!(matches!(
        game.act_as(&"alice".into(), PlayerAction::Check),
        Err(GameError::IllegalAction { .. })
    ));
    // nothing moved
    assert_eq!(balances(&game), vec![500, 495, 490]);
    assert_eq!(turn(&game), "alice");

    let msg = game.act_as(&"alice".into(), PlayerAction::Raise(20)).unwrap();
    assert!(msg.starts_with("alice raises by $20."));
    assert_eq!(game.cur_bet(), 30);
    assert_eq!(turn(&game), "bob");
}

#[test]
fn options_are_locked_during_a_hand() {
    let mut game = table(&["alice", "bob"]);
    game.set_option(OptionKey::Blind, 25).unwrap();
    assert_eq!(game.options().blind, 25);
    game.deal_hands().unwrap();
    assert_eq!(game.pot().value(), 75);
    assert!(matches!(
        game.set_option(OptionKey::Blind, 50),
        Err(GameError::WrongState { .. })
    ));
}

#[test]
fn all_in_player_is_skipped_until_showdown() {
    let mut game = table(&["alice", "bob", "carol"]);
    let deck = Deck::stacked(cards("Ac Ad 7s 2h 8c 3d Kh Qd 4s 9h Tc"));
    game.deal_with_deck(deck, Utc::now()).unwrap();

    let msg = game.all_in().unwrap(); // alice shoves 500
    assert!(msg.contains("alice is all in!"));
    assert_eq!(game.players()[0].status(), PlayerStatus::AllIn);
    game.fold().unwrap(); // bob
    let msg = game.call().unwrap(); // carol calls off everything
    assert!(msg.contains("carol is all in!"));
    assert!(msg.contains("alice wins $1005 with a pair."));
    assert!(msg.contains("carol has been knocked out of the game!"));
    assert_eq!(game.state(), GameState::NoHands);
    assert_eq!(balances(&game), vec![1005, 495]);
    assert_eq!(game.dealer().unwrap().name(), "bob");
    assert_eq!(game.winner(), None);
}

#[test]
fn table_view_hides_hole_cards_and_tracks_the_pot() {
    let mut game = table(&["alice", "bob", "carol"]);
    game.deal_hands().unwrap();
    let view = game.view();
    assert_eq!(view.state, GameState::HandsDealt);
    assert_eq!(view.pot, 15);
    assert_eq!(view.turn, Some("alice".into()));
    assert!(view.seats[0].dealer);
    assert_eq!(view.seats[2].contributed, 10);
    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("hole"));
}

fn heads_up_with(buy_in: u32) -> Game {
    let mut game = Game::new(GameOptions {
        buy_in,
        raise_delay: 0,
        seed: Some(1),
        ..GameOptions::default()
    });
    game.open("a".into()).unwrap();
    game.add_player("b".into()).unwrap();
    game.start().unwrap();
    game
}

#[test]
fn short_big_blind_cannot_win_the_uncalled_small_blind() {
    let mut game = heads_up_with(100);
    // a's seven high loses to b's aces and leaves a with 3 chips
    let deck = Deck::stacked(cards("2c 7d As Ad 3h 8s 9c Jd Kh"));
    game.deal_with_deck(deck, Utc::now()).unwrap();
    game.raise_bet(87).unwrap();
    game.call().unwrap();
    while game.state() != GameState::NoHands {
        game.check().unwrap();
    }
    assert_eq!(balances(&game), vec![3, 197]);
    assert_eq!(game.dealer().unwrap().name(), "b");

    let msg = game.deal_hands().unwrap();
    assert!(msg.contains("a has paid the big blind of $3.\na is all in!"));
    assert_eq!(turn(&game), "b");
    assert_eq!(game.pot().value(), 8);

    let msg = game.fold().unwrap();
    assert!(msg.starts_with("b has folded.\na wins $6!\n$2 is returned to b."));
    assert_eq!(balances(&game), vec![6, 194]);
    assert_eq!(game.state(), GameState::NoHands);
}

#[test]
fn buy_in_is_bounded_so_the_pot_cannot_overflow() {
    let mut game = Game::new(GameOptions {
        buy_in: u32::MAX,
        ..GameOptions::default()
    });
    game.open("a".into()).unwrap();
    game.add_player("b".into()).unwrap();
    assert!(matches!(
        game.start(),
        Err(GameError::OptionTooLarge { maximum: MAX_BUY_IN, .. })
    ));
    assert_eq!(game.state(), GameState::Waiting);
    assert!(game.set_option(OptionKey::BuyIn, u32::MAX).is_err());

    let mut game = heads_up_with(MAX_BUY_IN);
    game.deal_hands().unwrap();
    game.all_in().unwrap();
    game.all_in().unwrap();
    let total: u64 = game.players().iter().map(|p| u64::from(p.balance())).sum();
    assert_eq!(total, 2 * u64::from(MAX_BUY_IN));
}

#[test]
fn seats_are_limited_to_what_one_deck_can_deal() {
    let mut game = Game::new(GameOptions::default());
    game.open("p0".into()).unwrap();
    for i in 1..MAX_SEATS {
        assert!(game.add_player(format!("p{}", i).as_str().into()).unwrap());
    }
    assert_eq!(
        game.add_player("late".into()),
        Err(GameError::TableFull { seats: MAX_SEATS })
    );
    game.start().unwrap();
    game.deal_hands().unwrap();
    assert_eq!(game.state(), GameState::HandsDealt);
}

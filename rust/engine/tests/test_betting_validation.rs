use holdem_engine::errors::GameError;
use holdem_engine::player::{Player, PlayerAction};
use holdem_engine::rules::{validate_action, ValidatedAction};

fn player(balance: u32) -> Player {
    Player::with_balance("dana".into(), balance)
}

#[test]
fn check_requires_nothing_owed() {
    let p = player(100);
    assert_eq!(
        validate_action(&p, 0, PlayerAction::Check),
        Ok(ValidatedAction::Check)
    );
    let err = validate_action(&p, 20, PlayerAction::Check).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
    assert!(err.to_string().contains("$20"));
}

#[test]
fn call_with_nothing_owed_is_a_check() {
    let p = player(100);
    assert_eq!(
        validate_action(&p, 0, PlayerAction::Call),
        Ok(ValidatedAction::Check)
    );
    assert_eq!(
        validate_action(&p, 40, PlayerAction::Call),
        Ok(ValidatedAction::Call { to: 40 })
    );
    assert_eq!(
        validate_action(&p, 400, PlayerAction::Call),
        Ok(ValidatedAction::Call { to: 100 })
    );
}

#[test]
fn raise_bounds() {
    let p = player(100);
    assert_eq!(
        validate_action(&p, 30, PlayerAction::Raise(70)),
        Ok(ValidatedAction::Raise { by: 70, to: 100 })
    );
    assert_eq!(
        validate_action(&p, 30, PlayerAction::Raise(71)),
        Err(GameError::InvalidBetAmount {
            amount: 71,
            maximum: 70
        })
    );
    assert_eq!(
        validate_action(&p, 30, PlayerAction::Raise(0)),
        Err(GameError::InvalidBetAmount {
            amount: 0,
            maximum: 70
        })
    );
    // any positive raise is legal, there is no minimum raise size
    assert_eq!(
        validate_action(&p, 30, PlayerAction::Raise(1)),
        Ok(ValidatedAction::Raise { by: 1, to: 31 })
    );
}

#[test]
fn cannot_raise_when_the_bet_covers_the_stack() {
    let p = player(100);
    let err = validate_action(&p, 100, PlayerAction::Raise(5)).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
}

#[test]
fn all_in_resolves_to_raise_or_call() {
    let p = player(100);
    assert_eq!(
        validate_action(&p, 30, PlayerAction::AllIn),
        Ok(ValidatedAction::Raise { by: 70, to: 100 })
    );
    assert_eq!(
        validate_action(&p, 100, PlayerAction::AllIn),
        Ok(ValidatedAction::Call { to: 100 })
    );
    assert_eq!(
        validate_action(&p, 250, PlayerAction::AllIn),
        Ok(ValidatedAction::Call { to: 100 })
    );
}

#[test]
fn fold_is_always_available_to_an_active_player() {
    let p = player(0);
    assert_eq!(
        validate_action(&p, 500, PlayerAction::Fold),
        Ok(ValidatedAction::Fold)
    );
}

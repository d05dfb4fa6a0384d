use crate::errors::GameError;
use crate::player::{Player, PlayerAction as A};

/// An action that has passed validation, with the chip totals it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Bring this round's bet up to `to`; `to` below the bet to call means all-in short
    Call { to: u32 },
    /// Raise the bet to call by `by`, to a new total of `to`
    Raise { by: u32, to: u32 },
}

/// Validates a player action against the current bet to call.
///
/// Validation never mutates anything: an action refused here leaves the pot
/// and the player exactly as they were. All-in resolves to a call when the
/// bet to call already meets or exceeds the player's ceiling, and to a raise
/// of the remaining capacity otherwise.
///
/// # Errors
///
/// - [`GameError::IllegalAction`] when the player cannot act, checks while a
///   call is owed, or raises while unable to cover the current bet
/// - [`GameError::InvalidBetAmount`] when a raise is zero or exceeds `max_bet`
///
/// # Examples
///
/// ```
/// use holdem_engine::player::{Player, PlayerAction};
/// use holdem_engine::rules::{validate_action, ValidatedAction};
///
/// let short = Player::with_balance("sam".into(), 50);
/// // facing a bet of 100 with only 50 behind, all-in degenerates to a call
/// assert_eq!(
///     validate_action(&short, 100, PlayerAction::AllIn),
///     Ok(ValidatedAction::Call { to: 50 })
/// );
/// assert!(validate_action(&short, 100, PlayerAction::Check).is_err());
/// ```
pub fn validate_action(
    player: &Player,
    cur_bet: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    if !player.can_act() {
        return Err(GameError::illegal(format!(
            "{} cannot act in this hand",
            player.name()
        )));
    }
    let max_bet = player.max_bet();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if player.cur_bet() >= cur_bet {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::illegal(format!(
                    "{} can't check, they need to put in ${} to call",
                    player.name(),
                    cur_bet - player.cur_bet()
                )))
            }
        }
        A::Call => {
            if player.cur_bet() >= cur_bet {
                Ok(ValidatedAction::Check)
            } else {
                Ok(ValidatedAction::Call {
                    to: cur_bet.min(max_bet),
                })
            }
        }
        A::Raise(amount) => validate_raise(player, cur_bet, amount),
        A::AllIn => {
            if cur_bet >= max_bet {
                Ok(ValidatedAction::Call { to: max_bet })
            } else {
                validate_raise(player, cur_bet, max_bet - cur_bet)
            }
        }
    }
}

fn validate_raise(player: &Player, cur_bet: u32, amount: u32) -> Result<ValidatedAction, GameError> {
    let max_bet = player.max_bet();
    if cur_bet >= max_bet {
        return Err(GameError::illegal(format!(
            "{} doesn't have enough money to raise the current bet of ${}",
            player.name(),
            cur_bet
        )));
    }
    let maximum = max_bet - cur_bet;
    if amount == 0 || amount > maximum {
        return Err(GameError::InvalidBetAmount { amount, maximum });
    }
    Ok(ValidatedAction::Raise {
        by: amount,
        to: cur_bet + amount,
    })
}

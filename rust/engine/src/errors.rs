use thiserror::Error;

use crate::game::GameState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal action: {reason}")]
    IllegalAction { reason: String },
    #[error("Invalid raise amount: {amount}, maximum: {maximum}")]
    InvalidBetAmount { amount: u32, maximum: u32 },
    #[error("It's not {actual}'s turn (expected {expected})")]
    NotPlayersTurn { expected: String, actual: String },
    #[error("Operation not allowed in state {state:?}")]
    WrongState { state: GameState },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Malformed hand: {0}")]
    MalformedHand(String),
    #[error("Deck is empty")]
    DeckExhausted,
    #[error("Unknown player {0}")]
    UnknownPlayer(String),
    #[error("Player {0} is already seated")]
    AlreadySeated(String),
    #[error("No players are seated")]
    NoPlayers,
    #[error("'{0}' is not an option")]
    UnknownOption(String),
    #[error("Invalid card '{0}'")]
    InvalidCard(String),
    #[error("{value} is too large for {option} (maximum {maximum})")]
    OptionTooLarge {
        option: &'static str,
        value: u32,
        maximum: u32,
    },
    #[error("The table is full ({seats} seats)")]
    TableFull { seats: usize },
}

impl GameError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        GameError::IllegalAction {
            reason: reason.into(),
        }
    }
}

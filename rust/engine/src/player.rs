use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Opaque reference to whoever sits in a seat. The engine only compares and
/// prints it; the front-end decides what it maps to.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Where a seated player stands in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still holding cards and able to act
    Active,
    /// Gave up the hand; no claim on any pot
    Folded,
    /// Committed every chip; contests the pot but never acts again this hand
    AllIn,
}

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if nothing is owed)
    Check,
    /// Match the current bet, or go all-in short of it
    Call,
    /// Raise the current bet by the given amount
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

/// A seat at the table. Balance carries across hands; everything else is
/// reset when a new hand is dealt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    /// Chips not yet committed to the current hand
    balance: u32,
    hole: Option<[Card; 2]>,
    /// Chips placed in the current betting round
    cur_bet: u32,
    /// Whether the player has acted in the current betting round
    placed_bet: bool,
    status: PlayerStatus,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            balance: 0,
            hole: None,
            cur_bet: 0,
            placed_bet: false,
            status: PlayerStatus::Active,
        }
    }

    pub fn with_balance(id: PlayerId, balance: u32) -> Self {
        let mut p = Self::new(id);
        p.balance = balance;
        p
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }
    pub fn name(&self) -> &str {
        self.id.as_str()
    }
    pub fn balance(&self) -> u32 {
        self.balance
    }
    pub fn set_balance(&mut self, balance: u32) {
        self.balance = balance;
    }
    pub fn cur_bet(&self) -> u32 {
        self.cur_bet
    }
    pub fn has_acted(&self) -> bool {
        self.placed_bet
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    /// The most this player could have in front of them this round: the all-in ceiling.
    pub fn max_bet(&self) -> u32 {
        self.cur_bet + self.balance
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Hands the player their hole cards and resets every per-hand field.
    pub fn deal(&mut self, hole: [Card; 2]) {
        self.hole = Some(hole);
        self.cur_bet = 0;
        self.placed_bet = false;
        self.status = PlayerStatus::Active;
    }

    pub(crate) fn clear_cards(&mut self) {
        self.hole = None;
    }

    pub(crate) fn mark_acted(&mut self) {
        self.placed_bet = true;
    }

    pub(crate) fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    pub(crate) fn reset_round(&mut self) {
        self.cur_bet = 0;
        self.placed_bet = false;
    }

    /// Credits winnings. A table never holds more than `u32::MAX` chips in
    /// total, see [`crate::options::MAX_BUY_IN`].
    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.balance += amount;
    }

    /// Raises this round's bet to `new_total`, returning the chips moved.
    /// Callers cap `new_total` at [`Player::max_bet`]; emptying the balance
    /// marks the player all-in.
    pub(crate) fn bet_to(&mut self, new_total: u32) -> u32 {
        debug_assert!(new_total <= self.max_bet());
        let owed = new_total.saturating_sub(self.cur_bet).min(self.balance);
        self.balance -= owed;
        self.cur_bet += owed;
        if self.balance == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        owed
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Most seats one deck can serve: two hole cards each plus a five-card board.
pub const MAX_SEATS: usize = 23;

/// Largest buy-in for which every chip at a full table fits in a `u32`.
pub const MAX_BUY_IN: u32 = u32::MAX / MAX_SEATS as u32;

/// Named table options a front-end may change between hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    Blind,
    BuyIn,
    RaiseDelay,
    StartingBlind,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [
        OptionKey::Blind,
        OptionKey::BuyIn,
        OptionKey::RaiseDelay,
        OptionKey::StartingBlind,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OptionKey::Blind => "blind",
            OptionKey::BuyIn => "buy-in",
            OptionKey::RaiseDelay => "raise-delay",
            OptionKey::StartingBlind => "starting-blind",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OptionKey::Blind => "The current price of the small blind",
            OptionKey::BuyIn => "The amount of money all players start out with",
            OptionKey::RaiseDelay => "The number of minutes before blinds double",
            OptionKey::StartingBlind => "The starting price of the small blind",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionKey::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownOption(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Current small blind; the big blind is twice this
    pub blind: u32,
    pub buy_in: u32,
    /// Minutes between automatic blind doublings, 0 disables them
    pub raise_delay: u32,
    pub starting_blind: u32,
    /// Fixed shuffle seed for reproducible tables
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            blind: 5,
            buy_in: 500,
            raise_delay: 30,
            starting_blind: 5,
            seed: None,
        }
    }
}

impl GameOptions {
    pub fn get(&self, key: OptionKey) -> u32 {
        match key {
            OptionKey::Blind => self.blind,
            OptionKey::BuyIn => self.buy_in,
            OptionKey::RaiseDelay => self.raise_delay,
            OptionKey::StartingBlind => self.starting_blind,
        }
    }

    /// Changes one option. A buy-in above [`MAX_BUY_IN`] is refused and
    /// leaves the options untouched.
    pub fn set(&mut self, key: OptionKey, value: u32) -> Result<(), GameError> {
        match key {
            OptionKey::Blind => self.blind = value,
            OptionKey::BuyIn => {
                check_buy_in(value)?;
                self.buy_in = value;
            }
            OptionKey::RaiseDelay => self.raise_delay = value,
            OptionKey::StartingBlind => self.starting_blind = value,
        }
        Ok(())
    }

    /// Rejects option sets whose chips could overflow the pot arithmetic.
    pub fn validate(&self) -> Result<(), GameError> {
        check_buy_in(self.buy_in)
    }
}

fn check_buy_in(value: u32) -> Result<(), GameError> {
    if value > MAX_BUY_IN {
        return Err(GameError::OptionTooLarge {
            option: OptionKey::BuyIn.name(),
            value,
            maximum: MAX_BUY_IN,
        });
    }
    Ok(())
}

/// Bookkeeping for blind doubling. Nothing is scheduled: the clock is only
/// consulted when a hand is dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlindClock {
    last_raise: Option<DateTime<Utc>>,
}

impl BlindClock {
    pub fn last_raise(&self) -> Option<DateTime<Utc>> {
        self.last_raise
    }

    /// Returns true when the blinds should double for the hand dealt at `now`.
    ///
    /// A zero delay disarms the clock. Otherwise the first call arms it and
    /// later calls fire once more than `raise_delay` minutes have passed,
    /// re-arming from `now`.
    pub fn should_double(&mut self, raise_delay: u32, now: DateTime<Utc>) -> bool {
        if raise_delay == 0 {
            self.last_raise = None;
            return false;
        }
        match self.last_raise {
            None => {
                self.last_raise = Some(now);
                false
            }
            Some(since) if now - since > Duration::minutes(i64::from(raise_delay)) => {
                self.last_raise = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    pub fn reset(&mut self) {
        self.last_raise = None;
    }
}

//! Chip accounting for a single hand.
//!
//! [`PotManager`] moves chips from players into the pot and answers the two
//! questions the turn loop keeps asking: is this betting round finished, and
//! can anyone still bet at all. Settlement is split out into the pure
//! functions [`side_pots`] and [`settle`], which work on an immutable
//! snapshot of [`Contender`]s and know nothing about turn order.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{best_hand, HandStrength};
use crate::player::{Player, PlayerAction, PlayerId};
use crate::rules::{validate_action, ValidatedAction};

/// One entry of the contribution ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub player: PlayerId,
    /// Betting round index: 0 pre-flop, 1 flop, 2 turn, 3 river
    pub round: usize,
    pub amount: u32,
}

/// A player's stake in the hand at settlement time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contender {
    pub player: PlayerId,
    /// Total chips put in over the whole hand
    pub contributed: u32,
    pub folded: bool,
    /// Best hand, required for every contender that did not fold
    pub hand: Option<HandStrength>,
}

/// A layer of the pot and the players allowed to win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u32,
    pub eligible: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub player: PlayerId,
    pub amount: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PotManager {
    /// Seating order captured at the start of the hand
    seats: Vec<PlayerId>,
    /// Players with a claim on the pot, in seating order
    in_pot: Vec<PlayerId>,
    cur_bet: u32,
    round: usize,
    ledger: Vec<Contribution>,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_hand(&mut self, players: &[Player]) {
        self.seats = players.iter().map(|p| p.id().clone()).collect();
        self.in_pot = self.seats.clone();
        self.cur_bet = 0;
        self.round = 0;
        self.ledger.clear();
    }

    /// Posts a forced bet of up to `amount`. Returns true when it emptied the
    /// player's balance; a short blind is the all-in path, not an error.
    pub fn pay_blind(&mut self, player: &mut Player, amount: u32) -> bool {
        let target = amount.min(player.max_bet());
        let paid = player.bet_to(target);
        self.record(player.id(), paid);
        self.cur_bet = self.cur_bet.max(amount);
        tracing::debug!(player = %player.id(), amount, paid, "blind posted");
        player.balance() == 0
    }

    /// Matches the bet to call, or commits everything the player has left
    /// when that is less. Returns the chips moved.
    pub fn handle_call(&mut self, player: &mut Player) -> Result<u32, GameError> {
        self.ensure_in_pot(player)?;
        let to = self.cur_bet.min(player.max_bet());
        let moved = player.bet_to(to);
        player.mark_acted();
        self.record(player.id(), moved);
        tracing::debug!(player = %player.id(), moved, cur_bet = self.cur_bet, "call");
        Ok(moved)
    }

    /// Raises the bet to call by `amount` and brings the player up to it.
    /// Rejected before anything moves when `amount` exceeds the player's
    /// remaining capacity above the current bet.
    pub fn handle_raise(&mut self, player: &mut Player, amount: u32) -> Result<u32, GameError> {
        self.ensure_in_pot(player)?;
        let ValidatedAction::Raise { to, .. } =
            validate_action(player, self.cur_bet, PlayerAction::Raise(amount))?
        else {
            return Err(GameError::illegal("raise did not validate as a raise"));
        };
        self.cur_bet = to;
        let moved = player.bet_to(to);
        player.mark_acted();
        self.record(player.id(), moved);
        tracing::debug!(player = %player.id(), amount, moved, cur_bet = self.cur_bet, "raise");
        Ok(moved)
    }

    /// Drops the player's claim on the pot. Their chips stay in.
    pub fn handle_fold(&mut self, player: &mut Player) {
        self.in_pot.retain(|id| id != player.id());
        player.fold();
        player.mark_acted();
        tracing::debug!(player = %player.id(), "fold");
    }

    /// True once every contender is all-in or has both acted this round and
    /// matched the bet to call.
    pub fn round_over(&self, players: &[Player]) -> bool {
        self.contenders_in(players)
            .all(|p| p.is_all_in() || (p.has_acted() && p.cur_bet() >= self.cur_bet))
    }

    /// True when at most one contender can still put chips in.
    pub fn betting_over(&self, players: &[Player]) -> bool {
        self.contenders_in(players).filter(|p| p.can_act()).count() <= 1
    }

    /// Closes the betting round. The ledger keeps every chip; only the bet
    /// to call and each player's round bet start over.
    pub fn next_round(&mut self, players: &mut [Player]) {
        self.cur_bet = 0;
        self.round += 1;
        for p in players.iter_mut() {
            p.reset_round();
        }
    }

    pub fn value(&self) -> u32 {
        self.ledger.iter().map(|c| c.amount).sum()
    }

    pub fn cur_bet(&self) -> u32 {
        self.cur_bet
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn in_pot(&self) -> &[PlayerId] {
        &self.in_pot
    }

    pub fn is_in_pot(&self, id: &PlayerId) -> bool {
        self.in_pot.contains(id)
    }

    pub fn ledger(&self) -> &[Contribution] {
        &self.ledger
    }

    /// Total a player has put in over the whole hand.
    pub fn contributed(&self, id: &PlayerId) -> u32 {
        self.ledger
            .iter()
            .filter(|c| &c.player == id)
            .map(|c| c.amount)
            .sum()
    }

    /// Every seat dealt into the hand with what it put in. No hands are
    /// ranked, which is enough to settle a pot that nobody else contests.
    pub fn stakes(&self) -> Vec<Contender> {
        self.seats
            .iter()
            .map(|id| Contender {
                player: id.clone(),
                contributed: self.contributed(id),
                folded: !self.is_in_pot(id),
                hand: None,
            })
            .collect()
    }

    /// [`PotManager::stakes`] with the best hand of everyone still
    /// contesting the pot.
    pub fn contenders(
        &self,
        community: &[Card],
        players: &[Player],
    ) -> Result<Vec<Contender>, GameError> {
        self.stakes()
            .into_iter()
            .map(|mut contender| -> Result<Contender, GameError> {
                if !contender.folded {
                    let id = &contender.player;
                    let player = players
                        .iter()
                        .find(|p| p.id() == id)
                        .ok_or_else(|| GameError::UnknownPlayer(id.to_string()))?;
                    let hole = player
                        .hole_cards()
                        .ok_or_else(|| GameError::MalformedHand(format!("{} has no cards", id)))?;
                    contender.hand = Some(best_hand(community, &hole)?);
                }
                Ok(contender)
            })
            .collect()
    }

    /// Splits the contested pot among the contenders. See [`settle`]; chips
    /// nobody called are left to [`PotManager::uncalled`].
    pub fn get_winners(
        &self,
        community: &[Card],
        players: &[Player],
    ) -> Result<Vec<Payout>, GameError> {
        let contenders = self.contenders(community, players)?;
        Ok(settle(&contenders))
    }

    /// Chips to hand back because no contender matched them.
    pub fn uncalled(&self) -> Vec<Payout> {
        uncalled(&self.stakes())
    }

    fn contenders_in<'a>(&'a self, players: &'a [Player]) -> impl Iterator<Item = &'a Player> + 'a {
        players.iter().filter(move |p| self.is_in_pot(p.id()))
    }

    fn ensure_in_pot(&self, player: &Player) -> Result<(), GameError> {
        if self.is_in_pot(player.id()) {
            Ok(())
        } else {
            Err(GameError::illegal(format!(
                "{} is not contesting the pot",
                player.name()
            )))
        }
    }

    fn record(&mut self, id: &PlayerId, amount: u32) {
        if amount > 0 {
            self.ledger.push(Contribution {
                player: id.clone(),
                round: self.round,
                amount,
            });
        }
    }
}

/// Layers the pot at every distinct contribution level of a player who did
/// not fold, smallest first.
///
/// Each layer holds what every contender (folded or not) put in between the
/// previous level and this one, and is open only to unfolded players who
/// reached the level. Chips above the highest live level are not layered:
/// the layers plus [`uncalled`] always sum to the total contributed.
pub fn side_pots(contenders: &[Contender]) -> Vec<SidePot> {
    let mut levels: Vec<u32> = contenders
        .iter()
        .filter(|c| !c.folded && c.contributed > 0)
        .map(|c| c.contributed)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
    let mut prev = 0u32;
    for &level in &levels {
        let amount = contenders
            .iter()
            .map(|c| c.contributed.min(level) - c.contributed.min(prev))
            .sum();
        let eligible = contenders
            .iter()
            .filter(|c| !c.folded && c.contributed >= level)
            .map(|c| c.player.clone())
            .collect();
        pots.push(SidePot { amount, eligible });
        prev = level;
    }
    pots
}

/// What each contender put in above the highest stake of anyone still
/// contesting the pot. Only a folded player can be in that position, and
/// those chips go back to them.
pub fn uncalled(contenders: &[Contender]) -> Vec<Payout> {
    let top = contenders
        .iter()
        .filter(|c| !c.folded)
        .map(|c| c.contributed)
        .max()
        .unwrap_or(0);
    contenders
        .iter()
        .filter(|c| c.contributed > top)
        .map(|c| Payout {
            player: c.player.clone(),
            amount: c.contributed - top,
        })
        .collect()
}

/// Awards every layer from [`side_pots`] to the best hand(s) among its
/// eligible players.
///
/// Ties split evenly; leftover odd chips go one each to the tied winners in
/// seating order (the order of `contenders`). Payouts are summed per player
/// and returned in seating order. Contenders that did not fold must carry a
/// hand unless they are alone in a layer.
pub fn settle(contenders: &[Contender]) -> Vec<Payout> {
    let mut totals: Vec<u32> = vec![0; contenders.len()];
    for pot in side_pots(contenders) {
        let eligible: Vec<usize> = contenders
            .iter()
            .enumerate()
            .filter(|(_, c)| pot.eligible.contains(&c.player))
            .map(|(i, _)| i)
            .collect();
        let best = eligible.iter().filter_map(|&i| contenders[i].hand).max();
        let winners: Vec<usize> = eligible
            .into_iter()
            .filter(|&i| contenders[i].hand == best)
            .collect();
        if winners.is_empty() {
            continue;
        }
        let share = pot.amount / winners.len() as u32;
        let odd = (pot.amount % winners.len() as u32) as usize;
        for (n, &i) in winners.iter().enumerate() {
            totals[i] += share + u32::from(n < odd);
        }
    }
    contenders
        .iter()
        .zip(totals)
        .filter(|(_, amount)| *amount > 0)
        .map(|(c, amount)| Payout {
            player: c.player.clone(),
            amount,
        })
        .collect()
}

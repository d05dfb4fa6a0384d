use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::best_hand;
use crate::options::{BlindClock, GameOptions, OptionKey, MAX_SEATS};
use crate::player::{Player, PlayerAction, PlayerId, PlayerStatus};
use crate::pot::{settle, PotManager};
use crate::rules::{validate_action, ValidatedAction};

/// Stage of a table. Betting happens only in the four `*Dealt` states.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// No game has been opened at this table
    NoGame,
    /// A game is open and players are joining
    Waiting,
    /// Between hands, waiting for the dealer to deal
    NoHands,
    /// Hole cards dealt, pre-flop betting
    HandsDealt,
    FlopDealt,
    TurnDealt,
    RiverDealt,
}

impl GameState {
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            GameState::HandsDealt
                | GameState::FlopDealt
                | GameState::TurnDealt
                | GameState::RiverDealt
        )
    }
}

/// One seat of a [`TableView`]. Hole cards are deliberately absent; see
/// [`Game::hole_cards`] for private delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub player: PlayerId,
    pub balance: u32,
    pub cur_bet: u32,
    pub contributed: u32,
    pub status: PlayerStatus,
    pub dealer: bool,
}

/// Public snapshot of a table for front-ends that want structured state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub state: GameState,
    pub seats: Vec<SeatView>,
    pub board: Vec<Card>,
    pub pot: u32,
    pub cur_bet: u32,
    pub blind: u32,
    pub turn: Option<PlayerId>,
    pub winner: Option<PlayerId>,
}

/// A single table: seats, dealer button, and the hand in progress.
///
/// Every operation runs to completion synchronously and returns the status
/// text to relay to the table. Operations that are refused return an error
/// and leave the table untouched.
///
/// Seats form a stable ring: folding or going all-in changes a player's
/// [`PlayerStatus`] instead of removing them, so the dealer, first bettor
/// and turn indexes always point into `players`.
#[derive(Debug)]
pub struct Game {
    state: GameState,
    options: GameOptions,
    players: Vec<Player>,
    dealer_index: usize,
    first_bettor: usize,
    turn_index: usize,
    shared_cards: Vec<Card>,
    deck: Deck,
    pot: PotManager,
    clock: BlindClock,
    rng: ChaCha20Rng,
    hands_played: u32,
    winner: Option<PlayerId>,
}

impl Game {
    pub fn new(options: GameOptions) -> Self {
        let seed = options.seed.unwrap_or_else(rand::random);
        Self {
            state: GameState::NoGame,
            options,
            players: Vec::new(),
            dealer_index: 0,
            first_bettor: 0,
            turn_index: 0,
            shared_cards: Vec::with_capacity(5),
            deck: Deck::stacked(Vec::new()),
            pot: PotManager::new(),
            clock: BlindClock::default(),
            rng: ChaCha20Rng::seed_from_u64(seed),
            hands_played: 0,
            winner: None,
        }
    }

    // ---- accessors ----

    pub fn state(&self) -> GameState {
        self.state
    }
    pub fn options(&self) -> &GameOptions {
        &self.options
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn is_player(&self, id: &PlayerId) -> bool {
        self.player(id).is_some()
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }
    pub fn first_bettor(&self) -> usize {
        self.first_bettor
    }
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }
    pub fn shared_cards(&self) -> &[Card] {
        &self.shared_cards
    }
    pub fn pot(&self) -> &PotManager {
        &self.pot
    }
    pub fn cur_bet(&self) -> u32 {
        self.pot.cur_bet()
    }
    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }
    /// The last player standing once the game has ended.
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    pub fn dealer(&self) -> Option<&Player> {
        self.players.get(self.dealer_index)
    }

    /// Whose turn it is; `None` outside of betting.
    pub fn current_player(&self) -> Option<&Player> {
        if self.state.is_betting() {
            self.players.get(self.turn_index)
        } else {
            None
        }
    }

    pub fn hole_cards(&self, id: &PlayerId) -> Option<[Card; 2]> {
        self.player(id).and_then(Player::hole_cards)
    }

    // ---- table lifecycle ----

    /// Opens a new game at this table with `opener` seated. Only possible when
    /// no game is running; the seats of a finished game are discarded.
    pub fn open(&mut self, opener: PlayerId) -> Result<String, GameError> {
        if self.state != GameState::NoGame {
            return Err(GameError::WrongState { state: self.state });
        }
        self.players.clear();
        self.dealer_index = 0;
        self.first_bettor = 0;
        self.turn_index = 0;
        self.shared_cards.clear();
        self.winner = None;
        self.hands_played = 0;
        self.clock.reset();
        let msg = format!("A new game has been started by {}!", opener);
        self.players.push(Player::new(opener));
        self.state = GameState::Waiting;
        Ok(msg)
    }

    /// Seats a player while the game is waiting to start. Returns false if
    /// they were already seated.
    pub fn add_player(&mut self, id: PlayerId) -> Result<bool, GameError> {
        if self.state != GameState::Waiting {
            return Err(GameError::WrongState { state: self.state });
        }
        if self.is_player(&id) {
            return Ok(false);
        }
        if self.players.len() >= MAX_SEATS {
            return Err(GameError::TableFull { seats: MAX_SEATS });
        }
        self.players.push(Player::new(id));
        Ok(true)
    }

    /// Changes a named option. Refused while a hand is in progress.
    pub fn set_option(&mut self, key: OptionKey, value: u32) -> Result<(), GameError> {
        if self.state.is_betting() {
            return Err(GameError::WrongState { state: self.state });
        }
        self.options.set(key, value)
    }

    pub fn start(&mut self) -> Result<String, GameError> {
        if self.state != GameState::Waiting {
            return Err(GameError::WrongState { state: self.state });
        }
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        self.options.validate()?;
        self.dealer_index = 0;
        for player in &mut self.players {
            player.set_balance(self.options.buy_in);
        }
        self.options.blind = self.options.starting_blind;
        self.clock.reset();
        self.state = GameState::NoHands;
        tracing::info!(
            players = self.players.len(),
            buy_in = self.options.buy_in,
            blind = self.options.blind,
            "game started"
        );
        Ok(format!(
            "The game has begun!\n{}",
            self.status_between_rounds()
        ))
    }

    // ---- dealing ----

    pub fn deal_hands(&mut self) -> Result<String, GameError> {
        self.deal_hands_at(Utc::now())
    }

    /// Deals a hand as if the wall clock read `now`, which only matters for
    /// blind doubling.
    pub fn deal_hands_at(&mut self, now: DateTime<Utc>) -> Result<String, GameError> {
        let deck = Deck::shuffled(&mut self.rng);
        self.deal_with_deck(deck, now)
    }

    /// Deals from a caller-supplied deck. Hole cards go two at a time to each
    /// seat in order, then the board is drawn as the hand progresses.
    pub fn deal_with_deck(&mut self, deck: Deck, now: DateTime<Utc>) -> Result<String, GameError> {
        if self.state != GameState::NoHands {
            return Err(GameError::WrongState { state: self.state });
        }
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if deck.remaining() < self.players.len() * 2 + 5 {
            return Err(GameError::DeckExhausted);
        }

        self.deck = deck;
        self.shared_cards.clear();
        for player in &mut self.players {
            let hole = [self.deck.draw()?, self.deck.draw()?];
            player.deal(hole);
        }
        self.pot.new_hand(&self.players);
        self.state = GameState::HandsDealt;
        self.hands_played += 1;
        tracing::info!(
            hand = self.hands_played,
            dealer = %self.players[self.dealer_index].id(),
            "hands dealt"
        );

        let mut msg = String::from("The hands have been dealt!");
        if self.clock.should_double(self.options.raise_delay, now) {
            self.options.blind = self.options.blind.saturating_mul(2);
            tracing::info!(blind = self.options.blind, "blinds doubled");
            msg.push_str("\nBlinds are being doubled this round!");
        }
        let (preflop_first, blinds) = self.pay_blinds();
        msg.push_str(&blinds);
        self.turn_index = preflop_first;
        msg.push('\n');
        msg.push_str(&self.open_betting()?);
        Ok(msg)
    }

    /// Posts the blinds and fixes the post-flop first bettor. Returns the
    /// seat that acts first pre-flop along with the blind announcements.
    fn pay_blinds(&mut self) -> (usize, String) {
        let n = self.players.len();
        let d = self.dealer_index;
        self.first_bettor = (d + 1) % n;
        let (small, big, preflop_first) = if n > 2 {
            ((d + 1) % n, (d + 2) % n, (d + 3) % n)
        } else {
            // heads-up: the dealer posts the small blind and acts first pre-flop
            (d, (d + 1) % n, d)
        };

        let blind = self.options.blind;
        let mut msg = String::new();
        if blind > 0 {
            msg.push_str(&self.post_blind(small, blind, "small"));
            msg.push_str(&self.post_blind(big, blind.saturating_mul(2), "big"));
        }
        (preflop_first, msg)
    }

    fn post_blind(&mut self, seat: usize, amount: u32, which: &str) -> String {
        let player = &mut self.players[seat];
        let before = player.balance();
        let all_in = self.pot.pay_blind(player, amount);
        let mut msg = format!(
            "\n{} has paid the {} blind of ${}.",
            player.name(),
            which,
            before - player.balance()
        );
        if all_in {
            tracing::debug!(player = %player.id(), which, "all in on the blind");
            msg.push_str(&format!("\n{} is all in!", player.name()));
        }
        msg
    }

    /// Puts the action on the first seat able to act at or after
    /// `turn_index`, or moves the hand on if nobody needs to.
    fn open_betting(&mut self) -> Result<String, GameError> {
        if self.pot.round_over(&self.players) {
            return self.finish_round();
        }
        match self.next_active_from(self.turn_index) {
            Some(seat) => {
                self.turn_index = seat;
                Ok(self.cur_options())
            }
            None => self.showdown(),
        }
    }

    // ---- turn loop ----

    /// Ends the acting player's turn: either the next seat that can act gets
    /// the action, or the round (or the whole hand) is finished.
    pub fn next_turn(&mut self) -> Result<String, GameError> {
        if !self.state.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        if self.pot.round_over(&self.players) {
            return self.finish_round();
        }
        match self.next_active_from(self.turn_index + 1) {
            Some(seat) => {
                self.turn_index = seat;
                Ok(self.cur_options())
            }
            None => self.showdown(),
        }
    }

    fn finish_round(&mut self) -> Result<String, GameError> {
        if self.pot.betting_over(&self.players) {
            self.showdown()
        } else {
            self.next_round()
        }
    }

    /// Deals the next street and reopens betting at the first bettor.
    pub fn next_round(&mut self) -> Result<String, GameError> {
        let (label, count, next) = match self.state {
            GameState::HandsDealt => ("Dealing the flop:", 3, GameState::FlopDealt),
            GameState::FlopDealt => ("Dealing the turn:", 1, GameState::TurnDealt),
            GameState::TurnDealt => ("Dealing the river:", 1, GameState::RiverDealt),
            GameState::RiverDealt => return self.showdown(),
            state => return Err(GameError::WrongState { state }),
        };
        for _ in 0..count {
            let card = self.deck.draw()?;
            self.shared_cards.push(card);
        }
        self.state = next;
        self.pot.next_round(&mut self.players);
        tracing::debug!(state = ?self.state, board = %format_cards(&self.shared_cards), "street dealt");

        let mut msg = format!("{}\n{}\n", label, format_cards(&self.shared_cards));
        match self.next_active_from(self.first_bettor) {
            Some(seat) => {
                self.turn_index = seat;
                msg.push_str(&self.cur_options());
                Ok(msg)
            }
            None => {
                msg.push_str(&self.showdown()?);
                Ok(msg)
            }
        }
    }

    /// First seat at or after `start` (wrapping) whose player can act.
    fn next_active_from(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        (0..n)
            .map(|k| (start + k) % n)
            .find(|&seat| self.players[seat].can_act())
    }

    // ---- actions ----

    pub fn check(&mut self) -> Result<String, GameError> {
        self.act(PlayerAction::Check)
    }

    pub fn call(&mut self) -> Result<String, GameError> {
        self.act(PlayerAction::Call)
    }

    pub fn raise_bet(&mut self, amount: u32) -> Result<String, GameError> {
        self.act(PlayerAction::Raise(amount))
    }

    pub fn all_in(&mut self) -> Result<String, GameError> {
        self.act(PlayerAction::AllIn)
    }

    pub fn fold(&mut self) -> Result<String, GameError> {
        self.act(PlayerAction::Fold)
    }

    /// Performs `action` on behalf of `who`, refusing it unless it is their turn.
    pub fn act_as(&mut self, who: &PlayerId, action: PlayerAction) -> Result<String, GameError> {
        if !self.is_player(who) {
            return Err(GameError::UnknownPlayer(who.to_string()));
        }
        let current = self.current_player().ok_or(GameError::NoHandInProgress)?;
        if current.id() != who {
            return Err(GameError::NotPlayersTurn {
                expected: current.id().to_string(),
                actual: who.to_string(),
            });
        }
        self.act(action)
    }

    /// Performs `action` for the player whose turn it is.
    pub fn act(&mut self, action: PlayerAction) -> Result<String, GameError> {
        if !self.state.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        let seat = self.turn_index;
        let validated = validate_action(&self.players[seat], self.pot.cur_bet(), action)?;

        let player = &mut self.players[seat];
        let name = player.name().to_string();
        let mut msg = match validated {
            ValidatedAction::Check => {
                player.mark_acted();
                format!("{} checks.", name)
            }
            ValidatedAction::Call { .. } => {
                self.pot.handle_call(player)?;
                format!("{} calls.", name)
            }
            ValidatedAction::Raise { by, .. } => {
                self.pot.handle_raise(player, by)?;
                format!("{} raises by ${}.", name, by)
            }
            ValidatedAction::Fold => {
                self.pot.handle_fold(player);
                return self.after_fold(format!("{} has folded.", name));
            }
        };
        if self.players[seat].is_all_in() {
            msg.push_str(&format!("\n{} is all in!", name));
        }
        msg.push('\n');
        msg.push_str(&self.next_turn()?);
        Ok(msg)
    }

    fn after_fold(&mut self, mut msg: String) -> Result<String, GameError> {
        if let [last] = self.pot.in_pot() {
            let last = last.clone();
            // the winner only takes the layers they matched
            let value: u32 = settle(&self.pot.stakes()).iter().map(|p| p.amount).sum();
            if let Some(winner) = self.players.iter_mut().find(|p| p.id() == &last) {
                winner.add_chips(value);
            }
            tracing::info!(player = %last, amount = value, "pot won uncontested");
            msg.push_str(&format!("\n{} wins ${}!", last, value));
            msg.push_str(&self.return_uncalled());
            msg.push_str(&self.finish_hand());
            return Ok(msg);
        }
        msg.push('\n');
        msg.push_str(&self.next_turn()?);
        Ok(msg)
    }

    // ---- showdown ----

    /// Reveals the remaining board, pays every pot layer and closes the hand.
    pub fn showdown(&mut self) -> Result<String, GameError> {
        if !self.state.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        while self.shared_cards.len() < 5 {
            let card = self.deck.draw()?;
            self.shared_cards.push(card);
        }
        let mut payouts = self.pot.get_winners(&self.shared_cards, &self.players)?;

        let mut msg = format!(
            "We have reached the end of betting.\nAll cards will be revealed.\n{}",
            format_cards(&self.shared_cards)
        );
        for id in self.pot.in_pot() {
            if let Some([a, b]) = self.hole_cards(id) {
                msg.push_str(&format!("\n{}'s hand:\n{}  {}", id, a, b));
            }
        }

        payouts.sort_by_key(|p| p.amount);
        for payout in &payouts {
            let Some(winner) = self.players.iter_mut().find(|p| p.id() == &payout.player) else {
                continue;
            };
            let hand_name = match winner.hole_cards() {
                Some(hole) => best_hand(&self.shared_cards, &hole)?.to_string(),
                None => String::from("hand"),
            };
            winner.add_chips(payout.amount);
            tracing::info!(player = %payout.player, amount = payout.amount, hand = %hand_name, "payout");
            msg.push_str(&format!(
                "\n{} wins ${} with a {}.",
                payout.player, payout.amount, hand_name
            ));
        }
        msg.push_str(&self.return_uncalled());
        msg.push_str(&self.finish_hand());
        Ok(msg)
    }

    /// Gives back chips no contender matched, announcing each refund.
    fn return_uncalled(&mut self) -> String {
        let mut msg = String::new();
        for refund in self.pot.uncalled() {
            if let Some(owner) = self.players.iter_mut().find(|p| p.id() == &refund.player) {
                owner.add_chips(refund.amount);
            }
            tracing::debug!(player = %refund.player, amount = refund.amount, "uncalled chips returned");
            msg.push_str(&format!("\n${} is returned to {}.", refund.amount, refund.player));
        }
        msg
    }

    /// Removes broke players, moves the button and returns to `NoHands`, or
    /// ends the game when a single player is left.
    fn finish_hand(&mut self) -> String {
        let mut msg = String::new();
        let n = self.players.len();
        // the button goes to the first surviving seat after the current dealer
        let next_dealer = (1..=n)
            .map(|k| (self.dealer_index + k) % n)
            .find(|&seat| self.players[seat].balance() > 0);
        let survivors_before = next_dealer
            .map(|seat| {
                self.players[..seat]
                    .iter()
                    .filter(|p| p.balance() > 0)
                    .count()
            })
            .unwrap_or(0);

        for p in self.players.iter().filter(|p| p.balance() == 0) {
            tracing::info!(player = %p.id(), "eliminated");
            msg.push_str(&format!("\n{} has been knocked out of the game!", p.name()));
        }
        self.players.retain(|p| p.balance() > 0);
        for p in &mut self.players {
            p.clear_cards();
        }

        if self.players.len() <= 1 {
            self.state = GameState::NoGame;
            self.dealer_index = 0;
            self.winner = self.players.first().map(|p| p.id().clone());
            if let Some(winner) = &self.winner {
                tracing::info!(player = %winner, hands = self.hands_played, "game over");
                msg.push_str(&format!("\n{} wins the game!\nCongratulations!", winner));
            }
            return msg;
        }

        self.dealer_index = survivors_before;
        self.state = GameState::NoHands;
        msg.push('\n');
        msg.push_str(&self.status_between_rounds());
        msg
    }

    // ---- status text ----

    pub fn status_between_rounds(&self) -> String {
        let mut msg = self.chip_count();
        if let Some(dealer) = self.dealer() {
            msg.push_str(&format!(
                "{} is the current dealer.\nThe dealer deals when ready.",
                dealer.name()
            ));
        }
        msg
    }

    pub fn chip_count(&self) -> String {
        self.players
            .iter()
            .map(|p| format!("{} has ${}.\n", p.name(), p.balance()))
            .collect()
    }

    /// Describes the acting player's position and the actions open to them.
    pub fn cur_options(&self) -> String {
        let Some(player) = self.current_player() else {
            return String::new();
        };
        let cur_bet = self.pot.cur_bet();
        let mut msg = format!(
            "It is {}'s turn.\n{} currently has ${}.\nThe pot is currently ${}.",
            player.name(),
            player.name(),
            player.balance(),
            self.pot.value()
        );
        if cur_bet > 0 {
            msg.push_str(&format!(
                "\nThe current bet to meet is ${}\nand {} has ${}.",
                cur_bet,
                player.name(),
                player.cur_bet()
            ));
        } else {
            msg.push_str(&format!("\nThe current bet to meet is ${}.", cur_bet));
        }
        if player.cur_bet() == cur_bet {
            msg.push_str("\nOptions: check, raise or fold.");
        } else if player.max_bet() > cur_bet {
            msg.push_str("\nOptions: call, raise or fold.");
        } else {
            msg.push_str("\nOptions: all-in or fold.");
        }
        msg
    }

    pub fn view(&self) -> TableView {
        TableView {
            state: self.state,
            seats: self
                .players
                .iter()
                .enumerate()
                .map(|(i, p)| SeatView {
                    player: p.id().clone(),
                    balance: p.balance(),
                    cur_bet: p.cur_bet(),
                    contributed: if self.state.is_betting() {
                        self.pot.contributed(p.id())
                    } else {
                        0
                    },
                    status: p.status(),
                    dealer: i == self.dealer_index,
                })
                .collect(),
            board: self.shared_cards.clone(),
            pot: if self.state.is_betting() {
                self.pot.value()
            } else {
                0
            },
            cur_bet: if self.state.is_betting() {
                self.pot.cur_bet()
            } else {
                0
            },
            blind: self.options.blind,
            turn: self.current_player().map(|p| p.id().clone()),
            winner: self.winner.clone(),
        }
    }
}

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join("  ")
}

//! Table registry and command dispatch for `holdem play`.
//!
//! The engine refuses illegal operations with a [`GameError`], but players
//! expect a sentence telling them what went wrong. [`Session::dispatch`] runs
//! the same checks up front and answers in plain text; anything that still
//! fails in the engine is reported through the error's own message.

use std::collections::HashMap;

use holdem_engine::errors::GameError;
use holdem_engine::game::{Game, GameState};
use holdem_engine::options::{GameOptions, OptionKey};
use holdem_engine::player::{PlayerAction, PlayerId};

use crate::formatters::format_hole;
use crate::validation::TableCommand;

/// What a table says in response to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Text for everyone at the table
    pub public: String,
    /// Text meant for a single player, such as their hole cards
    pub private: Vec<(PlayerId, String)>,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            public: text.into(),
            private: Vec::new(),
        }
    }
}

/// Every open table, keyed by table identifier. Tables are created on first
/// use with the session's default options.
#[derive(Debug)]
pub struct TableRegistry {
    defaults: GameOptions,
    tables: HashMap<String, Game>,
}

impl TableRegistry {
    pub fn new(defaults: GameOptions) -> Self {
        Self {
            defaults,
            tables: HashMap::new(),
        }
    }

    pub fn get(&self, table: &str) -> Option<&Game> {
        self.tables.get(table)
    }

    pub fn get_or_create(&mut self, table: &str) -> &mut Game {
        let defaults = &self.defaults;
        self.tables.entry(table.to_string()).or_insert_with(|| {
            tracing::debug!(table, "table created");
            Game::new(defaults.clone())
        })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Routes parsed commands to the table they address.
#[derive(Debug)]
pub struct Session {
    registry: TableRegistry,
}

impl Session {
    pub fn new(defaults: GameOptions) -> Self {
        Self {
            registry: TableRegistry::new(defaults),
        }
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn table(&self, table: &str) -> Option<&Game> {
        self.registry.get(table)
    }

    pub fn dispatch(&mut self, table: &str, user: &str, command: &TableCommand) -> Reply {
        let game = self.registry.get_or_create(table);
        let user = PlayerId::from(user);
        let reply = match command {
            TableCommand::NewGame => new_game(game, &user),
            TableCommand::Join => join(game, &user),
            TableCommand::Start => start(game, &user),
            TableCommand::Deal => deal(game, &user),
            TableCommand::Check => betting(game, &user, PlayerAction::Check),
            TableCommand::Call => betting(game, &user, PlayerAction::Call),
            TableCommand::Raise(amount) => betting(game, &user, PlayerAction::Raise(*amount)),
            TableCommand::Fold => betting(game, &user, PlayerAction::Fold),
            TableCommand::AllIn => betting(game, &user, PlayerAction::AllIn),
            TableCommand::Count => Reply::say(chip_count(game)),
            TableCommand::Options => Reply::say(options_listing(game.options())),
            TableCommand::Set { option, value } => Reply::say(set_option(game, option, *value)),
            TableCommand::Help => Reply::say(help_listing()),
        };
        tracing::debug!(table, user = %user, ?command, state = ?game.state(), "dispatched");
        reply
    }
}

fn engine_reply(result: Result<String, GameError>) -> Reply {
    match result {
        Ok(text) => Reply::say(text),
        Err(e) => {
            tracing::warn!(error = %e, "engine refused a command the dispatcher allowed");
            Reply::say(e.to_string())
        }
    }
}

fn new_game(game: &mut Game, user: &PlayerId) -> Reply {
    match game.state() {
        GameState::NoGame => match game.open(user.clone()) {
            Ok(text) => Reply::say(format!("{}\nMessage join to join the game.", text)),
            Err(e) => Reply::say(e.to_string()),
        },
        GameState::Waiting => Reply::say(
            "There is already a game in progress,\nyou can't start a new game.\n\
             It still hasn't started yet, so you can still message join to join that game.",
        ),
        _ => Reply::say("There is already a game in progress,\nyou can't start a new game."),
    }
}

fn join(game: &mut Game, user: &PlayerId) -> Reply {
    match game.state() {
        GameState::NoGame => Reply::say(
            "No game has been started yet for you to join.\nMessage newgame to start a new game.",
        ),
        GameState::Waiting => match game.add_player(user.clone()) {
            Ok(true) => Reply::say(format!(
                "{} has joined the game!\nMessage join to join the game,\nor start to start the game.",
                user
            )),
            Ok(false) => Reply::say(format!("You've already joined the game {}!", user)),
            Err(GameError::TableFull { seats }) => Reply::say(format!(
                "Sorry {}, all {} seats are taken.",
                user, seats
            )),
            Err(e) => Reply::say(e.to_string()),
        },
        _ => Reply::say(format!(
            "The game is already in progress, {}.\nYou're not allowed to join right now.",
            user
        )),
    }
}

fn start(game: &mut Game, user: &PlayerId) -> Reply {
    match game.state() {
        GameState::NoGame => Reply::say("Message newgame if you would like to start a new game."),
        GameState::Waiting if !game.is_player(user) => Reply::say(format!(
            "You are not a part of that game yet, {}.\nPlease message join if you are interested in playing.",
            user
        )),
        GameState::Waiting if game.players().len() < 2 => Reply::say(
            "The game must have at least two players before\nit can be started.",
        ),
        GameState::Waiting => engine_reply(game.start()),
        _ => Reply::say(format!(
            "The game has already started, {}.\nIt can't be started twice.",
            user
        )),
    }
}

fn deal(game: &mut Game, user: &PlayerId) -> Reply {
    match game.state() {
        GameState::NoGame => {
            return Reply::say(
                "No game has been started for you to deal.\nMessage newgame to start one.",
            );
        }
        GameState::Waiting => {
            return Reply::say("You can't deal because the game hasn't started yet.");
        }
        GameState::NoHands => {}
        _ => return Reply::say("The cards have already been dealt."),
    }
    let dealer = game.dealer().map(|p| p.id().clone());
    if dealer.as_ref() != Some(user) {
        let dealer = dealer.map(|d| d.to_string()).unwrap_or_default();
        return Reply::say(format!(
            "You aren't the dealer, {}.\nPlease wait for {} to deal.",
            user, dealer
        ));
    }

    let mut reply = engine_reply(game.deal_hands());
    // hole cards are told privately; a hand that already ended has cleared them
    reply.private = game
        .players()
        .iter()
        .filter_map(|p| {
            p.hole_cards()
                .map(|hole| (p.id().clone(), format!("Your hand: {}", format_hole(&hole))))
        })
        .collect();
    reply
}

fn verb(action: &PlayerAction) -> &'static str {
    match action {
        PlayerAction::Fold => "fold",
        PlayerAction::Check => "check",
        PlayerAction::Call => "call",
        PlayerAction::Raise(_) => "raise",
        PlayerAction::AllIn => "go all in",
    }
}

fn betting(game: &mut Game, user: &PlayerId, action: PlayerAction) -> Reply {
    let verb = verb(&action);
    match game.state() {
        GameState::NoGame => {
            return Reply::say("No game has been started yet.\nMessage newgame to start one.");
        }
        GameState::Waiting => {
            return Reply::say(format!(
                "You can't {} because the game hasn't started yet.",
                verb
            ));
        }
        _ => {}
    }
    if !game.is_player(user) {
        return Reply::say(format!(
            "You can't {}, because you're not playing, {}.",
            verb, user
        ));
    }
    let Some(current) = game.current_player() else {
        return Reply::say(format!(
            "You can't {} because the hands haven't been dealt yet.",
            verb
        ));
    };
    if current.id() != user {
        return Reply::say(format!(
            "You can't {}, {}, because it's\n{}'s turn.",
            verb,
            user,
            current.name()
        ));
    }

    let cur_bet = game.cur_bet();
    match &action {
        PlayerAction::Check if current.cur_bet() < cur_bet => {
            return Reply::say(format!(
                "You can't check, {} because you need to\nput in ${} to call.",
                user,
                cur_bet - current.cur_bet()
            ));
        }
        PlayerAction::Raise(_) if cur_bet >= current.max_bet() => {
            return Reply::say(format!(
                "You don't have enough money to raise the current bet of ${}.",
                cur_bet
            ));
        }
        PlayerAction::Raise(amount) if cur_bet.saturating_add(*amount) > current.max_bet() => {
            return Reply::say(format!(
                "You don't have enough money to raise by ${}.\nThe most you can raise it by is ${}.",
                amount,
                current.max_bet() - cur_bet
            ));
        }
        _ => {}
    }
    engine_reply(game.act_as(user, action))
}

fn chip_count(game: &Game) -> String {
    match game.state() {
        GameState::NoGame | GameState::Waiting => {
            "You can't request a chip count because the game\nhasn't started yet.".to_string()
        }
        _ => game.chip_count(),
    }
}

/// Options as aligned columns of name, value and description.
pub fn options_listing(options: &GameOptions) -> String {
    let name_width = OptionKey::ALL
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0);
    let value_width = OptionKey::ALL
        .iter()
        .map(|&k| options.get(k).to_string().len())
        .max()
        .unwrap_or(0);
    OptionKey::ALL
        .iter()
        .map(|&k| {
            format!(
                "{:<nw$}{:<vw$}{}\n",
                k.name(),
                options.get(k),
                k.description(),
                nw = name_width + 2,
                vw = value_width + 2
            )
        })
        .collect()
}

pub fn help_listing() -> String {
    const WIDTH: usize = 12;
    TableCommand::HELP
        .iter()
        .map(|(name, description)| format!("{:<w$}{}\n", name, description, w = WIDTH + 2))
        .collect()
}

fn set_option(game: &mut Game, option: &str, value: i64) -> String {
    let Ok(key) = option.parse::<OptionKey>() else {
        return format!(
            "'{}' is not an option. Message options to see\nthe list of options.",
            option
        );
    };
    if value < 0 {
        return format!("Cannot set {} to a negative value!", key);
    }
    let Ok(value) = u32::try_from(value) else {
        return format!("{} is too large for {}.", value, key);
    };
    match game.set_option(key, value) {
        Ok(()) => format!("The {} is now set to {}.", key, value),
        Err(GameError::WrongState { .. }) => {
            "Options can't be changed while a hand is being played.".to_string()
        }
        Err(GameError::OptionTooLarge { maximum, .. }) => format!(
            "{} is too large for {}.\nThe most it can be is {}.",
            value, key, maximum
        ),
        Err(e) => e.to_string(),
    }
}

//! # holdem-engine: No-Limit Texas Hold'em Rules Core
//!
//! A synchronous rules engine for multi-player no-limit Hold'em tables. It
//! tracks chip ownership, enforces legal betting actions, deals the board
//! street by street, ranks hands, and settles side pots at showdown. It has
//! no transport, persistence or rendering of its own: a front-end feeds it
//! discrete actions and relays the status text it returns.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), codes and parsing
//! - [`deck`] - Shuffled draw sequence seeded from ChaCha20
//! - [`hand`] - Best-of-seven hand ranking and comparison
//! - [`player`] - Seats, balances, per-round bets and statuses
//! - [`rules`] - Action validation, kept apart from mutation
//! - [`pot`] - Contribution ledger, round completion and side-pot settlement
//! - [`options`] - Table options and the blind doubling clock
//! - [`game`] - Table state machine: dealer rotation, blinds, turns, showdown
//! - [`errors`] - Error types for refused operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::game::{Game, GameState};
//! use holdem_engine::options::GameOptions;
//!
//! let mut game = Game::new(GameOptions { seed: Some(7), ..GameOptions::default() });
//! game.open("alice".into()).unwrap();
//! game.add_player("bob".into()).unwrap();
//! game.add_player("carol".into()).unwrap();
//! game.start().unwrap();
//! game.deal_hands().unwrap();
//!
//! assert_eq!(game.state(), GameState::HandsDealt);
//! assert_eq!(game.pot().value(), 15);
//! // three seats: the dealer acts first pre-flop
//! assert_eq!(game.current_player().unwrap().name(), "alice");
//! ```
//!
//! ## Hand Ranking
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::best_hand;
//!
//! let board = parse_cards("Kh Qh Jh 2c 3d").unwrap();
//! let hole = parse_cards("Ah Th").unwrap();
//! let strength = best_hand(&board, &[hole[0], hole[1]]).unwrap();
//! assert_eq!(strength.to_string(), "straight flush");
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod pot;
pub mod rules;

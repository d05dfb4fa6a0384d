//! Hand evaluation command.
//!
//! Ranks a set of 5 to 7 card codes the same way the showdown does and
//! prints the best five-card category.

use crate::error::CliError;
use crate::formatters::{format_board, format_strength};
use holdem_engine::cards::parse_cards;
use holdem_engine::hand::evaluate_cards;
use std::io::Write;

/// Handle the eval command.
///
/// Codes may be passed as separate arguments or as one quoted string.
///
/// # Errors
///
/// `CliError::Engine` when a code does not parse or the card count or
/// duplicates make the hand malformed.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" "))?;
    let strength = evaluate_cards(&cards)?;
    tracing::debug!(cards = cards.len(), category = %strength.category, "evaluated");
    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(out, "Hand: {}", format_strength(&strength))?;
    Ok(())
}

//! Deal command handler.
//!
//! Deals one hand face up from a seeded deck: two hole cards per seat and a
//! full board, then names the best hand. Useful for checking the shuffle and
//! the evaluator without running a table.

use crate::error::CliError;
use crate::formatters::{format_board, format_hole};
use holdem_engine::deck::Deck;
use holdem_engine::hand::{HandStrength, best_hand};
use std::io::Write;

/// Handle the deal command.
///
/// Same seed, same output. Without a seed a random one is drawn and printed
/// so the deal can be reproduced.
pub fn handle_deal_command(
    players: u8,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !(2..=10).contains(&players) {
        return Err(CliError::InvalidInput(format!(
            "players must be between 2 and 10, got {}",
            players
        )));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    writeln!(out, "Seed: {}", seed)?;

    let mut holes = Vec::with_capacity(usize::from(players));
    for _ in 0..players {
        holes.push([deck.draw()?, deck.draw()?]);
    }
    let board = (0..5).map(|_| deck.draw()).collect::<Result<Vec<_>, _>>()?;

    let mut strengths: Vec<HandStrength> = Vec::with_capacity(holes.len());
    for (i, hole) in holes.iter().enumerate() {
        let strength = best_hand(&board, hole)?;
        writeln!(out, "Hole P{}: {}  ({})", i + 1, format_hole(hole), strength)?;
        strengths.push(strength);
    }
    writeln!(out, "Board: {}", format_board(&board))?;

    let Some(best) = strengths.iter().max() else {
        return Ok(());
    };
    let winners: Vec<String> = strengths
        .iter()
        .enumerate()
        .filter(|(_, s)| *s == best)
        .map(|(i, _)| format!("P{}", i + 1))
        .collect();
    writeln!(out, "Winner: {} with a {}", winners.join(", "), best)?;
    Ok(())
}

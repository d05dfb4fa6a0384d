//! Card and board formatting for terminal display.
//!
//! Suits render as `♥ ♦ ♣ ♠` where the terminal can show them and fall back
//! to the ASCII letters `h d c s` elsewhere, so `A♠` becomes `As`, which is
//! also the form `holdem eval` accepts as input.

use holdem_engine::cards::Card;
use holdem_engine::hand::HandStrength;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Formats a card as `A♠`, or `As` without Unicode support.
///
/// ```rust
/// use holdem_engine::cards::{Card, Rank, Suit};
/// # use holdem_cli::formatters::format_card;
///
/// let ten = Card::new(Rank::Ten, Suit::Hearts);
/// let formatted = format_card(&ten);
/// assert!(formatted == "10♥" || formatted == "10h");
/// ```
pub fn format_card(card: &Card) -> String {
    if supports_unicode() {
        card.to_string()
    } else {
        card.code()
    }
}

/// Formats a board in bracket notation, `[]` when nothing is dealt yet.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

pub fn format_hole(hole: &[Card; 2]) -> String {
    format!("{} {}", format_card(&hole[0]), format_card(&hole[1]))
}

/// Category name followed by the deciding ranks, e.g. `pair (K, A, 9, 4)`.
pub fn format_strength(strength: &HandStrength) -> String {
    let ranks: Vec<String> = strength
        .kickers
        .iter()
        .filter(|&&r| r > 0)
        .map(|&r| rank_label(r).to_string())
        .collect();
    format!("{} ({})", strength.category, ranks.join(", "))
}

fn rank_label(value: u8) -> &'static str {
    holdem_engine::cards::Rank::from_u8(value).map_or("?", |r| r.label())
}

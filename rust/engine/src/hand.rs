use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Score of a five-card hand. Field order matters: the derived `Ord`
/// compares the category first, then the deciding ranks high to low.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // deciding ranks then kickers, ordered high -> low; unused slots are 0
    pub kickers: [u8; 5],
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.category.fmt(f)
    }
}

/// Scores exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
    }
    let flush = is_flush(cards);
    let straight = straight_high_from_mask(rank_mask);

    if let (true, Some(high)) = (flush, straight) {
        return HandStrength {
            category: Category::StraightFlush,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // (count, rank) groups, biggest group first then highest rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let mut kickers = [0u8; 5];
    for (slot, &(_, rank)) in kickers.iter_mut().zip(groups.iter()) {
        *slot = rank;
    }
    let shape: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();

    let category = match shape.as_slice() {
        [4, 1] => Category::FourOfAKind,
        [3, 2] => Category::FullHouse,
        _ if flush => Category::Flush,
        _ if straight.is_some() => Category::Straight,
        [3, 1, 1] => Category::ThreeOfAKind,
        [2, 2, 1] => Category::TwoPair,
        [2, 1, 1, 1] => Category::OnePair,
        _ => Category::HighCard,
    };
    if let (Category::Straight, Some(high)) = (category, straight) {
        kickers = [high, 0, 0, 0, 0];
    }
    HandStrength { category, kickers }
}

/// Finds the best five-card hand among 5 to 7 distinct cards.
///
/// Every five-card subset is scored with [`evaluate_five`] and the maximum is
/// returned, so the result does not depend on the order of `cards`.
///
/// # Errors
///
/// [`GameError::MalformedHand`] when fewer than 5 or more than 7 cards are
/// given, or when a card appears twice.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{evaluate_cards, Category};
///
/// let cards = parse_cards("Ah 2d 3c 4s 5h Kd Kc").unwrap();
/// let strength = evaluate_cards(&cards).unwrap();
/// assert_eq!(strength.category, Category::Straight);
/// assert_eq!(strength.kickers[0], 5);
/// ```
pub fn evaluate_cards(cards: &[Card]) -> Result<HandStrength, GameError> {
    if cards.len() < 5 {
        return Err(GameError::MalformedHand(format!(
            "need at least 5 cards, got {}",
            cards.len()
        )));
    }
    if cards.len() > 7 {
        return Err(GameError::MalformedHand(format!(
            "at most 7 cards can be ranked, got {}",
            cards.len()
        )));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for c in cards {
        if !seen.insert(*c) {
            return Err(GameError::MalformedHand(format!("duplicate card {}", c)));
        }
    }

    let n = cards.len();
    let mut best: Option<HandStrength> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let score = evaluate_five(&five);
                        if best.map_or(true, |current| score > current) {
                            best = Some(score);
                        }
                    }
                }
            }
        }
    }
    best.ok_or_else(|| GameError::MalformedHand("no five-card subset".into()))
}

/// Best hand a player can make from the shared cards and their two hole cards.
pub fn best_hand(community: &[Card], hole: &[Card; 2]) -> Result<HandStrength, GameError> {
    let mut cards = Vec::with_capacity(community.len() + 2);
    cards.extend_from_slice(community);
    cards.extend_from_slice(hole);
    evaluate_cards(&cards)
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

fn is_flush(cards: &[Card; 5]) -> bool {
    let first: Suit = cards[0].suit;
    cards.iter().all(|c| c.suit == first)
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

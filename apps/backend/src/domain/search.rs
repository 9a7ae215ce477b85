//! Legal-play search over a hand.
//!
//! Hands hold at most 14 cards, so every subset is enumerated with a bitmask.

use crate::domain::combinations::{beats, classify, Combination};
use crate::domain::{Card, Rank};

fn subset(cards: &[Card], mask: u32) -> Vec<Card> {
    cards
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, c)| *c)
        .collect()
}

fn is_legal_against(play: &Combination, table: Option<&Combination>) -> bool {
    match table {
        None => true,
        Some(top) => beats(play, top),
    }
}

/// First subset of `pool` accepted by `wanted` that classifies and is legal
/// against `table`.
fn find_play(
    pool: &[Card],
    table: Option<&Combination>,
    bombs_only: bool,
    wanted: impl Fn(&[Card]) -> bool,
) -> Option<Vec<Card>> {
    let total: u32 = 1 << pool.len();
    (1..total).find_map(|mask| {
        let cards = subset(pool, mask);
        if !wanted(&cards) {
            return None;
        }
        let combination = classify(&cards, table, None).ok()?;
        let kind_ok = !bombs_only || combination.is_bomb();
        (kind_ok && is_legal_against(&combination, table)).then_some(cards)
    })
}

/// A legal play from `hand` that contains a normal card of `rank`, bombs
/// included. `None` when the hand cannot honour the request.
pub fn find_requested_play(
    hand: &[Card],
    rank: Rank,
    table: Option<&Combination>,
) -> Option<Vec<Card>> {
    if !hand.iter().any(|c| c.is_normal_of(rank)) {
        return None;
    }
    find_play(hand, table, false, |cards| {
        cards.iter().any(|c| c.is_normal_of(rank))
    })
}

/// Like [`find_requested_play`] but restricted to bombs.
pub fn find_requested_bomb(
    hand: &[Card],
    rank: Rank,
    table: Option<&Combination>,
) -> Option<Vec<Card>> {
    if !hand.iter().any(|c| c.is_normal_of(rank)) {
        return None;
    }
    let normals: Vec<Card> = hand.iter().copied().filter(|c| c.rank().is_some()).collect();
    find_play(&normals, table, true, |cards| {
        cards.len() >= 4 && cards.iter().any(|c| c.is_normal_of(rank))
    })
}

/// A bomb from `hand` that beats `table` (any bomb on an empty table).
pub fn find_bomb(hand: &[Card], table: Option<&Combination>) -> Option<Vec<Card>> {
    // Bombs are made of normal cards only.
    let normals: Vec<Card> = hand.iter().copied().filter(|c| c.rank().is_some()).collect();
    if normals.len() < 4 {
        return None;
    }
    find_play(&normals, table, true, |cards| cards.len() >= 4)
}

pub fn has_playable_bomb(hand: &[Card], table: Option<&Combination>) -> bool {
    find_bomb(hand, table).is_some()
}

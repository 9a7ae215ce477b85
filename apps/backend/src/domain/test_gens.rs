// Proptest generators for domain types.
// Every card set produced here classifies; non-bomb generators never yield a
// bomb.

use proptest::prelude::*;

use crate::domain::{deal_hands, Card, Rank, RoundState, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Generate a single normal card
pub fn normal_card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card::normal(suit, rank))
}

fn rank_of(value: u8) -> Rank {
    Rank::from_value(value).unwrap_or(Rank::Two)
}

/// `count` cards of the same rank with distinct suits.
pub fn of_a_kind(count: usize) -> impl Strategy<Value = Vec<Card>> {
    (rank(), prop::sample::subsequence(Suit::ALL.to_vec(), count))
        .prop_map(|(rank, suits)| suits.into_iter().map(|s| Card::normal(s, rank)).collect())
}

pub fn single() -> impl Strategy<Value = Vec<Card>> {
    prop_oneof![
        8 => normal_card().prop_map(|c| vec![c]),
        1 => Just(vec![Card::MAHJONG]),
        1 => Just(vec![Card::PHOENIX]),
        1 => Just(vec![Card::DRAGON]),
    ]
}

pub fn full_house() -> impl Strategy<Value = Vec<Card>> {
    (rank(), rank())
        .prop_filter("distinct ranks", |(a, b)| a != b)
        .prop_flat_map(|(triple, pair)| {
            (
                prop::sample::subsequence(Suit::ALL.to_vec(), 3),
                prop::sample::subsequence(Suit::ALL.to_vec(), 2),
            )
                .prop_map(move |(ts, ps)| {
                    let mut cards: Vec<Card> = ts.into_iter().map(|s| Card::normal(s, triple)).collect();
                    cards.extend(ps.into_iter().map(|s| Card::normal(s, pair)));
                    cards
                })
        })
}

/// Mixed-suit straight of `len` normal cards.
pub fn straight(len: usize) -> impl Strategy<Value = Vec<Card>> {
    let min_top = len as u8 + 1;
    (min_top..=14u8, prop::collection::vec(suit(), len))
        .prop_filter("not a straight flush", |(_, suits)| {
            suits.iter().any(|s| *s != suits[0])
        })
        .prop_map(move |(top, suits)| {
            suits
                .into_iter()
                .enumerate()
                .map(|(i, s)| Card::normal(s, rank_of(top - i as u8)))
                .collect()
        })
}

/// `pairs` consecutive pairs.
pub fn sequence(pairs: usize) -> impl Strategy<Value = Vec<Card>> {
    let min_top = pairs as u8 + 1;
    (
        min_top..=14u8,
        prop::collection::vec(prop::sample::subsequence(Suit::ALL.to_vec(), 2), pairs),
    )
        .prop_map(move |(top, suit_pairs)| {
            suit_pairs
                .into_iter()
                .enumerate()
                .flat_map(|(i, suits)| {
                    let rank = rank_of(top - i as u8);
                    suits.into_iter().map(move |s| Card::normal(s, rank))
                })
                .collect()
        })
}

pub fn straight_flush(len: usize) -> impl Strategy<Value = Vec<Card>> {
    let min_top = len as u8 + 1;
    (min_top..=14u8, suit()).prop_map(move |(top, suit)| {
        (0..len as u8)
            .map(|i| Card::normal(suit, rank_of(top - i)))
            .collect()
    })
}

pub fn non_bomb() -> impl Strategy<Value = Vec<Card>> {
    prop_oneof![
        single(),
        of_a_kind(2),
        of_a_kind(3),
        full_house(),
        (5usize..=8).prop_flat_map(straight),
        (2usize..=4).prop_flat_map(sequence),
    ]
}

pub fn bomb() -> impl Strategy<Value = Vec<Card>> {
    prop_oneof![of_a_kind(4), (5usize..=9).prop_flat_map(straight_flush)]
}

/// A freshly dealt round with every player's cards revealed.
pub fn revealed_round() -> impl Strategy<Value = RoundState> {
    any::<u64>().prop_map(|seed| {
        let mut round = RoundState::deal(seed);
        for key in crate::domain::PlayerKey::ALL {
            let _ = round.reveal_all(key);
        }
        round
    })
}

/// Four hands of a seeded deal, for tests that only need the cards.
pub fn dealt_hands() -> impl Strategy<Value = [Vec<Card>; 4]> {
    any::<u64>().prop_map(deal_hands)
}

//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{DECK_SIZE, HAND_SIZE, PLAYERS};
use crate::domain::{Card, Rank, Special, Suit};

/// Generate the full 56-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::normal(suit, rank));
        }
    }
    for special in [
        Special::Mahjong,
        Special::Dog,
        Special::Phoenix,
        Special::Dragon,
    ] {
        deck.push(Card::Special(special));
    }
    deck
}

/// Shuffle the deck with a seeded ChaCha stream and deal 14 cards to each seat.
///
/// Hands keep dealing order: the first `PARTIAL_HAND_SIZE` cards of each hand
/// are the ones revealed before the full reveal.
pub fn deal_hands(seed: u64) -> [Vec<Card>; PLAYERS] {
    let mut deck = full_deck();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (seat, hand) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        *hand = deck[start..start + HAND_SIZE].to_vec();
    }
    hands
}

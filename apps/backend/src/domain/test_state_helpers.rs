//! Builders and drivers for round-state tests.

use crate::domain::search::find_requested_play;
use crate::domain::{
    beats, classify, try_parse_cards, Card, PassOutcome, PlayerKey, RoundState, Trades,
};

pub fn cards(keys: &[&str]) -> Vec<Card> {
    try_parse_cards(keys.iter().copied()).expect("valid card keys")
}

pub fn card(key: &str) -> Card {
    key.parse().expect("valid card key")
}

/// A main-phase round built from card keys, trading skipped.
pub fn round_with_hands(hands: [&[&str]; 4]) -> RoundState {
    RoundState::from_hands(hands.map(cards))
}

/// A dealt round with every player's cards revealed.
pub fn revealed_round(seed: u64) -> RoundState {
    let mut round = RoundState::deal(seed);
    for key in PlayerKey::ALL {
        round.reveal_all(key).expect("reveal");
    }
    round
}

/// Trades built from the first three cards of the player's hand.
pub fn first_three(round: &RoundState, key: PlayerKey) -> Trades {
    let hand = round.player(key).hand();
    Trades {
        teammate: hand[0],
        left: hand[1],
        right: hand[2],
    }
}

/// Run the trading protocol to the first lead.
pub fn trade_and_acknowledge(round: &mut RoundState) -> PlayerKey {
    for key in PlayerKey::ALL {
        let trades = first_three(round, key);
        round.submit_trades(key, trades).expect("trade");
    }
    let mut leader = None;
    for key in PlayerKey::ALL {
        leader = round.acknowledge_trades(key).expect("acknowledge");
    }
    leader.expect("all players acknowledged")
}

/// Take one legal action for whoever has to act: give a pending Dragon to
/// the left opponent, honour the requested rank, otherwise play the lowest
/// single that is legal, otherwise pass.
pub fn step(round: &mut RoundState) {
    if round.table().pending_dragon() {
        let owner = round.table().owner().expect("dragon owner");
        round.give_dragon(owner, owner.left()).expect("give dragon");
        return;
    }
    let who = round.current_player().expect("someone to act");
    let hand = round.player(who).hand().to_vec();
    let table = round.table().combination().cloned();

    if let Some(rank) = round.requested_rank() {
        if let Some(play) = find_requested_play(&hand, rank, table.as_ref()) {
            round.play(who, &play, None).expect("requested play");
            return;
        }
    }

    let mut sorted = hand.clone();
    sorted.sort();
    let single = sorted.into_iter().find(|c| {
        classify(&[*c], table.as_ref(), None)
            .map(|combo| table.as_ref().map_or(true, |top| beats(&combo, top)))
            .unwrap_or(false)
    });

    match single {
        Some(c) => {
            round.play(who, &[c], None).expect("single play");
        }
        None => {
            let outcome = round.pass(who).expect("pass");
            if let PassOutcome::DragonPending { .. } = outcome {
                step(round);
            }
        }
    }
}

/// Drive a main-phase round to its end.
pub fn autoplay(round: &mut RoundState) {
    for _ in 0..2_000 {
        if round.is_over() {
            return;
        }
        step(round);
    }
    panic!("round did not finish");
}

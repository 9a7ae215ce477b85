//! Property tests for the trading protocol.
//!
//! Properties tested:
//! - Hand sizes are unchanged by trading
//! - The multiset of all cards is unchanged by trading
//! - Each player holds what the other three addressed to them

use std::collections::HashMap;

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::{Card, PlayerKey, RoundPhase, Trades};

fn multiset(hands: impl Iterator<Item = Vec<Card>>) -> HashMap<Card, usize> {
    let mut counts = HashMap::new();
    for card in hands.flatten() {
        *counts.entry(card).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: trading is atomic and conserves cards
    #[test]
    fn prop_trading_is_atomic(
        mut round in test_gens::revealed_round(),
        picks in prop::collection::vec(prop::sample::subsequence((0..14usize).collect::<Vec<_>>(), 3), 4),
    ) {
        let before = multiset(round.players().iter().map(|p| p.hand().to_vec()));

        let mut sent = Vec::new();
        for (key, idx) in PlayerKey::ALL.into_iter().zip(picks.iter()) {
            let hand = round.player(key).hand();
            let trades = Trades { teammate: hand[idx[0]], left: hand[idx[1]], right: hand[idx[2]] };
            sent.push(trades);
            let resolved = round.submit_trades(key, trades).unwrap();
            prop_assert_eq!(resolved, key == PlayerKey::Player4);
            if !resolved {
                // Nothing moves until the last submission.
                prop_assert_eq!(round.player(key).hand().len(), 14);
                prop_assert!(round.player(key).holds_all(&trades.cards()));
            }
        }

        prop_assert_eq!(round.phase(), RoundPhase::Main);
        let after = multiset(round.players().iter().map(|p| p.hand().to_vec()));
        prop_assert_eq!(before, after);

        for key in PlayerKey::ALL {
            let player = round.player(key);
            prop_assert_eq!(player.hand().len(), 14);
            let expected = [
                sent[key.teammate().index()].teammate,
                sent[key.left().index()].right,
                sent[key.right().index()].left,
            ];
            for card in expected {
                prop_assert!(player.holds(&card));
            }
        }
    }
}

//! Property tests for combination ordering (pure domain).
//!
//! Properties tested:
//! - Same kind and length compares exactly by rank
//! - compare is antisymmetric for every pair of combinations
//! - compare is transitive on comparable triples
//! - Every bomb beats every non-bomb

use std::cmp::Ordering;

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::{classify, compare, Card, Combination, Rank, Suit};

fn classified(cards: &[Card]) -> Combination {
    classify(cards, None, None).expect("generator yields valid combinations")
}

fn any_combination() -> impl Strategy<Value = Vec<Card>> {
    prop_oneof![test_gens::non_bomb(), test_gens::bomb()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: pairs of the same length order exactly like their ranks
    #[test]
    fn prop_pairs_order_by_rank(a in test_gens::rank(), b in test_gens::rank()) {
        let pair_a = classified(&[Card::normal(Suit::Red, a), Card::normal(Suit::Blue, a)]);
        let pair_b = classified(&[Card::normal(Suit::Green, b), Card::normal(Suit::Black, b)]);
        prop_assert_eq!(compare(&pair_a, &pair_b), Some(a.cmp(&b)));
    }

    /// Property: straights of equal length order by their top card
    #[test]
    fn prop_straights_order_by_top(
        (a, b) in (5usize..=8).prop_flat_map(|len| (test_gens::straight(len), test_gens::straight(len))),
    ) {
        let top = |cards: &[Card]| cards.iter().filter_map(Card::rank).max();
        let (sa, sb) = (classified(&a), classified(&b));
        prop_assert_eq!(compare(&sa, &sb), Some(top(&a).cmp(&top(&b))));
    }

    /// Property: compare(a, b) is the reverse of compare(b, a)
    #[test]
    fn prop_compare_antisymmetric(a in any_combination(), b in any_combination()) {
        let (ca, cb) = (classified(&a), classified(&b));
        prop_assert_eq!(compare(&ca, &cb), compare(&cb, &ca).map(Ordering::reverse));
    }

    /// Property: comparable triples are ordered transitively
    #[test]
    fn prop_compare_transitive(
        a in test_gens::bomb(),
        b in test_gens::bomb(),
        c in test_gens::bomb(),
    ) {
        let (ca, cb, cc) = (classified(&a), classified(&b), classified(&c));
        if compare(&ca, &cb) == Some(Ordering::Greater) && compare(&cb, &cc) == Some(Ordering::Greater) {
            prop_assert_eq!(compare(&ca, &cc), Some(Ordering::Greater));
        }
        if compare(&ca, &cb) == Some(Ordering::Less) && compare(&cb, &cc) == Some(Ordering::Less) {
            prop_assert_eq!(compare(&ca, &cc), Some(Ordering::Less));
        }
    }

    /// Property: a bomb beats any non-bomb combination
    #[test]
    fn prop_bomb_beats_non_bomb(bomb in test_gens::bomb(), other in test_gens::non_bomb()) {
        let (b, o) = (classified(&bomb), classified(&other));
        prop_assert!(b.is_bomb());
        prop_assert!(!o.is_bomb());
        prop_assert_eq!(compare(&b, &o), Some(Ordering::Greater));
    }

    /// Property: a Phoenix played on any normal single beats it and loses to the next rank
    #[test]
    fn prop_phoenix_sits_half_above(rank in test_gens::rank()) {
        let table = classified(&[Card::normal(Suit::Red, rank)]);
        let phoenix = classify(&[Card::PHOENIX], Some(&table), None).unwrap();
        prop_assert_eq!(compare(&phoenix, &table), Some(Ordering::Greater));
        if let Some(next) = Rank::from_value(rank.value() + 1) {
            let higher = classified(&[Card::normal(Suit::Blue, next)]);
            prop_assert_eq!(compare(&higher, &phoenix), Some(Ordering::Greater));
        }
    }
}

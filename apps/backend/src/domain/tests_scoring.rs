use proptest::prelude::*;

use crate::domain::rules::{DOUBLE_WIN_POINTS, ROUND_POINTS};
use crate::domain::scoring::is_double_win;
use crate::domain::test_state_helpers::{
    autoplay, cards, revealed_round, round_with_hands, trade_and_acknowledge,
};
use crate::domain::{score_round, Bet, PlayerKey, RoundScore, Team};
use crate::errors::domain::DomainError;

use PlayerKey::{Player1 as P1, Player2 as P2, Player3 as P3, Player4 as P4};

#[test]
fn double_win_scores_fixed_bonus() {
    let mut round = round_with_hands([
        &["red_5"],
        &["red_2", "blue_K"],
        &["red_6"],
        &["red_3", "dragon"],
    ]);
    round.place_bet(P1, Bet::Tichu).unwrap();
    round.play(P1, &cards(&["red_5"]), None).unwrap();
    round.pass(P2).unwrap();
    round.play(P3, &cards(&["red_6"]), None).unwrap();
    assert!(round.is_over());
    assert!(is_double_win(round.finish_order()));

    let score = score_round(&round).unwrap();
    assert_eq!(
        score,
        RoundScore {
            team02: DOUBLE_WIN_POINTS + 100,
            team13: 0,
        }
    );
}

#[test]
fn last_player_pays_tricks_and_hand() {
    // P3 and P4 start out, so P3 is the first finisher.
    let mut round = round_with_hands([
        &["red_10", "red_K"],
        &["red_A", "red_5", "blue_3"],
        &[],
        &[],
    ]);
    round.play(P1, &cards(&["red_10"]), None).unwrap();
    round.play(P2, &cards(&["red_A"]), None).unwrap();
    round.pass(P1).unwrap();
    // P2 collected the ten and leads again.
    round.play(P2, &cards(&["blue_3"]), None).unwrap();
    let played = round.play(P1, &cards(&["red_K"]), None).unwrap();
    assert!(played.round_over);

    let score = score_round(&round).unwrap();
    // King trick (10) to P1, P2's tricks (10) to the first finisher's team,
    // P2's remaining five to the opponents.
    assert_eq!(score, RoundScore { team02: 25, team13: 0 });
}

#[test]
fn failed_bets_cost_the_team() {
    let mut round = round_with_hands([&["red_5"], &["red_6", "blue_2"], &["red_8"], &[]]);
    round.place_bet(P2, Bet::Tichu).unwrap();
    round.play(P1, &cards(&["red_5"]), None).unwrap();
    round.play(P2, &cards(&["red_6"]), None).unwrap();
    let played = round.play(P3, &cards(&["red_8"]), None).unwrap();
    assert!(played.round_over);
    assert_eq!(round.finish_order(), &[P4, P1, P3]);

    // P4 finished first, so P2's Tichu fails.
    let score = score_round(&round).unwrap();
    assert_eq!(score, RoundScore { team02: 5, team13: -100 });
    assert_eq!(score.get(Team::Team13), -100);
}

#[test]
fn unfinished_round_is_an_internal_error() {
    let round = revealed_round(1);
    assert!(matches!(score_round(&round), Err(DomainError::Internal(_))));
}

#[test]
fn double_win_detection() {
    assert!(is_double_win(&[P2, P4]));
    assert!(!is_double_win(&[P1, P2, P3]));
    assert!(!is_double_win(&[P1]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: without bets, a round's scores sum to the deck's 100 points,
    /// or to the double-win bonus.
    #[test]
    fn prop_round_points_are_conserved(seed in any::<u64>()) {
        let mut round = revealed_round(seed);
        trade_and_acknowledge(&mut round);
        autoplay(&mut round);

        let score = score_round(&round).unwrap();
        if is_double_win(round.finish_order()) {
            let winners = round.finish_order()[0].team();
            prop_assert_eq!(score.get(winners), DOUBLE_WIN_POINTS);
            prop_assert_eq!(score.get(winners.opponent()), 0);
        } else {
            prop_assert_eq!(score.team02 + score.team13, ROUND_POINTS);
        }
    }
}

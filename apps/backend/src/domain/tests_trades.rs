use crate::domain::test_state_helpers::{first_three, revealed_round, trade_and_acknowledge};
use crate::domain::{Bet, Card, PlayerKey, RoundPhase, RoundState, Trades};
use crate::errors::domain::RuleKind;

#[test]
fn reveal_is_once_and_only_during_trades() {
    let mut round = RoundState::deal(3);
    let full = round.reveal_all(PlayerKey::Player1).unwrap();
    assert_eq!(full.len(), 14);
    assert_eq!(
        round.reveal_all(PlayerKey::Player1).unwrap_err().rule(),
        Some(&RuleKind::AlreadyDone)
    );
    assert_eq!(round.player(PlayerKey::Player2).hand().len(), 8);
}

#[test]
fn grand_tichu_only_before_reveal() {
    let mut round = RoundState::deal(9);
    round.place_bet(PlayerKey::Player1, Bet::GrandTichu).unwrap();
    assert_eq!(round.player(PlayerKey::Player1).bet(), Bet::GrandTichu);

    round.reveal_all(PlayerKey::Player2).unwrap();
    let err = round
        .place_bet(PlayerKey::Player2, Bet::GrandTichu)
        .unwrap_err();
    assert_eq!(err.rule(), Some(&RuleKind::InvalidBet));

    // Second bet is rejected whatever it is.
    round.reveal_all(PlayerKey::Player1).unwrap();
    let err = round.place_bet(PlayerKey::Player1, Bet::Tichu).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleKind::AlreadyDone));
}

#[test]
fn tichu_needs_full_hand_and_no_play() {
    let mut round = RoundState::deal(10);
    let err = round.place_bet(PlayerKey::Player3, Bet::Tichu).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleKind::InvalidBet));

    round.reveal_all(PlayerKey::Player3).unwrap();
    round.place_bet(PlayerKey::Player3, Bet::Tichu).unwrap();
    assert_eq!(
        round.place_bet(PlayerKey::Player4, Bet::None).unwrap_err().rule(),
        Some(&RuleKind::InvalidBet)
    );
}

#[test]
fn trade_validation() {
    let mut round = RoundState::deal(21);
    let unrevealed = first_three(&round, PlayerKey::Player1);
    let err = round
        .submit_trades(PlayerKey::Player1, unrevealed)
        .unwrap_err();
    assert_eq!(err.rule(), Some(&RuleKind::InvalidTrade));

    let mut round = revealed_round(21);
    let hand = round.player(PlayerKey::Player1).hand().to_vec();
    let duplicate = Trades {
        teammate: hand[0],
        left: hand[0],
        right: hand[1],
    };
    assert_eq!(
        round
            .submit_trades(PlayerKey::Player1, duplicate)
            .unwrap_err()
            .rule(),
        Some(&RuleKind::InvalidTrade)
    );

    let foreign = round.player(PlayerKey::Player2).hand()[0];
    let not_held = Trades {
        teammate: hand[0],
        left: hand[1],
        right: foreign,
    };
    assert_eq!(
        round
            .submit_trades(PlayerKey::Player1, not_held)
            .unwrap_err()
            .rule(),
        Some(&RuleKind::CardNotInHand)
    );

    let ok = first_three(&round, PlayerKey::Player1);
    assert!(!round.submit_trades(PlayerKey::Player1, ok).unwrap());
    assert_eq!(
        round.submit_trades(PlayerKey::Player1, ok).unwrap_err().rule(),
        Some(&RuleKind::AlreadyDone)
    );
    assert_eq!(round.phase(), RoundPhase::Trades);
}

#[test]
fn trades_route_cards_to_the_right_seats() {
    let mut round = revealed_round(77);
    let sent: Vec<Trades> = PlayerKey::ALL
        .iter()
        .map(|k| first_three(&round, *k))
        .collect();

    let mut resolved = false;
    for (key, trades) in PlayerKey::ALL.into_iter().zip(sent.iter()) {
        resolved = round.submit_trades(key, *trades).unwrap();
    }
    assert!(resolved);
    assert_eq!(round.phase(), RoundPhase::Main);
    assert_eq!(round.current_player(), None);

    // Player1: teammate is Player3, left is Player4, right is Player2.
    let incoming = *round.player(PlayerKey::Player1).incoming_trades().unwrap();
    assert_eq!(incoming.teammate, sent[2].teammate);
    assert_eq!(incoming.left, sent[3].right);
    assert_eq!(incoming.right, sent[1].left);

    for key in PlayerKey::ALL {
        let player = round.player(key);
        assert_eq!(player.hand().len(), 14);
        for card in player.incoming_trades().unwrap().cards() {
            assert!(player.holds(&card));
        }
        for card in player.outgoing_trades().unwrap().cards() {
            assert!(!player.holds(&card));
        }
    }
}

#[test]
fn mahjong_holder_leads_after_all_acknowledge() {
    let mut round = revealed_round(5);
    for key in PlayerKey::ALL {
        let trades = first_three(&round, key);
        round.submit_trades(key, trades).unwrap();
    }

    // No play before everyone acknowledged.
    let holder = round.mahjong_holder().unwrap();
    let err = round.play(holder, &[Card::MAHJONG], None).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleKind::PhaseMismatch));

    assert_eq!(round.acknowledge_trades(PlayerKey::Player1).unwrap(), None);
    assert_eq!(
        round.acknowledge_trades(PlayerKey::Player1).unwrap_err().rule(),
        Some(&RuleKind::AlreadyDone)
    );
    assert_eq!(round.acknowledge_trades(PlayerKey::Player2).unwrap(), None);
    assert_eq!(round.acknowledge_trades(PlayerKey::Player3).unwrap(), None);
    assert_eq!(
        round.acknowledge_trades(PlayerKey::Player4).unwrap(),
        Some(holder)
    );
    assert_eq!(round.current_player(), Some(holder));
}

#[test]
fn reveal_and_grand_tichu_closed_after_trades() {
    let mut round = revealed_round(8);
    trade_and_acknowledge(&mut round);
    assert_eq!(
        round.reveal_all(PlayerKey::Player1).unwrap_err().rule(),
        Some(&RuleKind::PhaseMismatch)
    );
    assert_eq!(
        round
            .place_bet(PlayerKey::Player1, Bet::GrandTichu)
            .unwrap_err()
            .rule(),
        Some(&RuleKind::InvalidBet)
    );
    // Tichu is still open before the first play.
    round.place_bet(PlayerKey::Player2, Bet::Tichu).unwrap();
}

use serde::{Deserialize, Serialize};

use crate::domain::player::Bet;
use crate::domain::round::RoundState;
use crate::domain::rules::{DOUBLE_WIN_POINTS, GRAND_TICHU_POINTS, TICHU_POINTS};
use crate::domain::state::{PlayerKey, Team};
use crate::domain::card_points;
use crate::errors::domain::DomainError;

/// Points scored by each team in one round.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
    pub team02: i32,
    pub team13: i32,
}

impl RoundScore {
    pub fn get(&self, team: Team) -> i32 {
        match team {
            Team::Team02 => self.team02,
            Team::Team13 => self.team13,
        }
    }

    fn add(&mut self, team: Team, points: i32) {
        match team {
            Team::Team02 => self.team02 += points,
            Team::Team13 => self.team13 += points,
        }
    }
}

/// Whether the first two finishers are teammates.
pub fn is_double_win(finish_order: &[PlayerKey]) -> bool {
    matches!(finish_order, [first, second, ..] if first.team() == second.team())
}

fn bet_value(bet: Bet) -> i32 {
    match bet {
        Bet::None => 0,
        Bet::Tichu => TICHU_POINTS,
        Bet::GrandTichu => GRAND_TICHU_POINTS,
    }
}

/// Score a finished round: card points plus bet resolution.
pub fn score_round(round: &RoundState) -> Result<RoundScore, DomainError> {
    if !round.is_over() {
        return Err(DomainError::internal("scoring a round that is not over"));
    }
    let order = round.finish_order();
    let first = *order
        .first()
        .ok_or_else(|| DomainError::internal("round over without a finisher"))?;

    let mut score = RoundScore::default();

    if is_double_win(order) {
        score.add(first.team(), DOUBLE_WIN_POINTS);
    } else {
        for player in round.players() {
            let won = card_points(player.won_cards());
            if order.contains(&player.key()) {
                score.add(player.key().team(), won);
            } else {
                // The last player: tricks to the first finisher, hand to the opponents.
                score.add(first.team(), won);
                score.add(player.key().team().opponent(), card_points(player.hand()));
            }
        }
    }

    for player in round.players() {
        let value = bet_value(player.bet());
        let points = if player.key() == first { value } else { -value };
        score.add(player.key().team(), points);
    }

    Ok(score)
}

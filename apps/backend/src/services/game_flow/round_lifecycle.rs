use rand::Rng;
use tracing::{debug, info};

use super::{GameFlow, GameResult, GameState, GameStatus};
use crate::domain::{derive_dealing_seed, score_round, PlayerKey, RoundState};
use crate::errors::domain::{DomainError, RuleKind};
use crate::ws::protocol::ServerEvent;

impl GameFlow {
    /// Start a new game. Accepted from INIT and OVER; totals and history are
    /// reset and the first round is dealt.
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.state.status == GameStatus::InProgress {
            return Err(DomainError::business(
                RuleKind::GameInProgress,
                "A game is already in progress",
            ));
        }

        let game_seed = self
            .config
            .rng_seed
            .unwrap_or_else(|| rand::rng().random());
        self.state = GameState::new(self.config.winning_score);
        self.state.game_seed = game_seed;
        self.state.status = GameStatus::InProgress;
        info!(
            game_seed,
            winning_score = self.state.winning_score,
            "game started"
        );

        self.publish(ServerEvent::GameStarted {
            winning_score: self.state.winning_score,
        });
        self.start_round();
        Ok(())
    }

    /// Deal the next round and send every seat its first eight cards.
    pub(super) fn start_round(&mut self) {
        self.state.round_no += 1;
        let round_no = self.state.round_no;
        let seed = derive_dealing_seed(self.state.game_seed, round_no);
        let round = RoundState::deal(seed);
        info!(round_no, "round dealt");

        for key in PlayerKey::ALL {
            self.send(
                key,
                ServerEvent::GameRoundStarted {
                    round_no,
                    partial_hand: round.player(key).hand().to_vec(),
                },
            );
        }
        self.round = Some(round);
    }

    /// Score the finished round, then end the game or deal the next round.
    pub(super) fn finish_round(&mut self) -> Result<(), DomainError> {
        let round = self
            .round
            .as_ref()
            .ok_or_else(|| DomainError::internal("current round not initialized"))?;
        let score = score_round(round)?;

        self.state.team_scores.team02 += score.team02;
        self.state.team_scores.team13 += score.team13;
        self.state.score_history.push(score);
        info!(
            round_no = self.state.round_no,
            team02 = score.team02,
            team13 = score.team13,
            team02_total = self.state.team_scores.team02,
            team13_total = self.state.team_scores.team13,
            "round scored"
        );

        self.publish(ServerEvent::GameRoundEnded {
            round_score: score,
            team02_total_score: self.state.team_scores.team02,
            team13_total_score: self.state.team_scores.team13,
        });

        if self.state.reached_end() {
            self.end_game(GameResult::from_round(&score));
        } else {
            self.start_round();
        }
        Ok(())
    }

    fn end_game(&mut self, result: GameResult) {
        self.state.status = GameStatus::Over;
        self.state.result = Some(result);
        info!(
            ?result,
            rounds = self.state.score_history.len(),
            "game over"
        );
        self.publish(ServerEvent::GameEnded {
            result,
            team02_total_score: self.state.team_scores.team02,
            team13_total_score: self.state.team_scores.team13,
            scores: self.state.score_history.clone(),
        });
    }

    /// A seat disconnected. During a game the leaving player's opponents win
    /// immediately; otherwise only the departure is announced.
    pub fn on_player_left(&mut self, key: PlayerKey, had_joined: bool) {
        let ends_game = self.state.status == GameStatus::InProgress;
        if ends_game {
            self.state.status = GameStatus::Over;
        }
        debug!(player = ?key, had_joined, ends_game, "player left");

        if had_joined {
            self.publish(ServerEvent::PlayerLeft {
                player_key: key,
                game_over: ends_game,
            });
        }
        if ends_game {
            self.end_game(key.team().opponent().into());
        }
    }
}

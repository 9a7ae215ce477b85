//! Game orchestration: drives rounds of the rules engine across a whole game
//! and turns every accepted action into outbound events.
//!
//! The orchestrator never talks to a transport. It is handed two emitters by
//! the session boundary, one for per-player events and one for events every
//! seat may see, and only emits after a transition has been applied.

mod player_actions;
mod round_lifecycle;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::domain::{PlayerKey, RoundScore, RoundState, Team};
use crate::errors::domain::{DomainError, RuleKind};
use crate::ws::protocol::ServerEvent;

/// Delivers an event to a single seat.
pub type PlayerEmitter = Box<dyn Fn(PlayerKey, ServerEvent) + Send + Sync>;
/// Delivers an event to every seat of the session.
pub type BroadcastEmitter = Box<dyn Fn(ServerEvent) + Send + Sync>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Init,
    InProgress,
    Over,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "TEAM_02")]
    Team02,
    #[serde(rename = "TEAM_13")]
    Team13,
    #[serde(rename = "TIE")]
    Tie,
}

impl From<Team> for GameResult {
    fn from(team: Team) -> Self {
        match team {
            Team::Team02 => GameResult::Team02,
            Team::Team13 => GameResult::Team13,
        }
    }
}

impl GameResult {
    /// Winner of a finished game, decided on the last round's scores.
    pub fn from_round(score: &RoundScore) -> Self {
        match score.team02.cmp(&score.team13) {
            std::cmp::Ordering::Greater => GameResult::Team02,
            std::cmp::Ordering::Less => GameResult::Team13,
            std::cmp::Ordering::Equal => GameResult::Tie,
        }
    }
}

/// Game-level bookkeeping that outlives a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub winning_score: i32,
    /// Cumulative totals over all completed rounds.
    pub team_scores: RoundScore,
    pub score_history: Vec<RoundScore>,
    pub status: GameStatus,
    pub result: Option<GameResult>,
    pub game_seed: u64,
    /// Number of the current (or last) round, starting at 1.
    pub round_no: u32,
}

impl GameState {
    fn new(winning_score: i32) -> Self {
        Self {
            winning_score,
            team_scores: RoundScore::default(),
            score_history: Vec::new(),
            status: GameStatus::Init,
            result: None,
            game_seed: 0,
            round_no: 0,
        }
    }

    /// Whether the game is decided after the latest round.
    fn reached_end(&self) -> bool {
        self.winning_score == 0
            || self.team_scores.team02 >= self.winning_score
            || self.team_scores.team13 >= self.winning_score
    }
}

/// Orchestrator for one game session.
pub struct GameFlow {
    state: GameState,
    round: Option<RoundState>,
    config: GameConfig,
    emit_to: PlayerEmitter,
    broadcast: BroadcastEmitter,
}

impl GameFlow {
    pub fn new(config: GameConfig, emit_to: PlayerEmitter, broadcast: BroadcastEmitter) -> Self {
        Self {
            state: GameState::new(config.winning_score),
            round: None,
            config,
            emit_to,
            broadcast,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// The current round, if a game has been started.
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn send(&self, to: PlayerKey, event: ServerEvent) {
        (self.emit_to)(to, event);
    }

    fn publish(&self, event: ServerEvent) {
        (self.broadcast)(event);
    }

    /// Replace the current round with a prepared one.
    #[cfg(test)]
    pub(crate) fn install_round(&mut self, round: RoundState) {
        self.round = Some(round);
    }

    /// The round accepting player actions.
    fn round_mut(&mut self) -> Result<&mut RoundState, DomainError> {
        if self.state.status != GameStatus::InProgress {
            return Err(DomainError::business(
                RuleKind::PhaseMismatch,
                "The game is not in progress",
            ));
        }
        self.round
            .as_mut()
            .ok_or_else(|| DomainError::internal("current round not initialized"))
    }
}

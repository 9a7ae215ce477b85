use serde::{Deserialize, Serialize};

use crate::domain::{Bet, Card, CombinationKind, PlayerKey, Rank, RoundScore, Trades};
use crate::errors::ErrorKind;
use crate::services::game_flow::GameResult;

/// Intents sent by a connected player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientIntent {
    JoinGame {
        nickname: String,
    },
    /// Ready signal; the game starts once all four seats are ready.
    StartGame,
    PlaceBet {
        bet: Bet,
    },
    RevealAllCards,
    #[serde(rename_all = "camelCase")]
    TradeCards {
        teammate_card_key: Card,
        left_card_key: Card,
        right_card_key: Card,
    },
    ReceiveTrade,
    #[serde(rename_all = "camelCase")]
    PlayCards {
        selected_card_keys: Vec<Card>,
        #[serde(default)]
        phoenix_alt_name: Option<Rank>,
    },
    PassTurn,
    DropBomb,
    #[serde(rename_all = "camelCase")]
    RequestCard {
        requested_card_name: Rank,
    },
    #[serde(rename_all = "camelCase")]
    GiveDragon {
        chosen_opponent_key: PlayerKey,
    },
}

impl ClientIntent {
    /// Wire name of the intent, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ClientIntent::JoinGame { .. } => "join-game",
            ClientIntent::StartGame => "start-game",
            ClientIntent::PlaceBet { .. } => "place-bet",
            ClientIntent::RevealAllCards => "reveal-all-cards",
            ClientIntent::TradeCards { .. } => "trade-cards",
            ClientIntent::ReceiveTrade => "receive-trade",
            ClientIntent::PlayCards { .. } => "play-cards",
            ClientIntent::PassTurn => "pass-turn",
            ClientIntent::DropBomb => "drop-bomb",
            ClientIntent::RequestCard { .. } => "request-card",
            ClientIntent::GiveDragon { .. } => "give-dragon",
        }
    }
}

/// Events sent to players. Events carrying hand contents are only ever
/// delivered to the owning player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    WaitingForJoin {
        player_key: PlayerKey,
        winning_score: i32,
        present_players: Vec<PlayerInfo>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerJoined {
        player_key: PlayerKey,
        nickname: String,
    },
    #[serde(rename_all = "camelCase")]
    PlayerReady {
        player_key: PlayerKey,
    },
    #[serde(rename_all = "camelCase")]
    PlayerLeft {
        player_key: PlayerKey,
        game_over: bool,
    },
    #[serde(rename_all = "camelCase")]
    GameStarted {
        winning_score: i32,
    },
    #[serde(rename_all = "camelCase")]
    GameRoundStarted {
        round_no: u32,
        partial_hand: Vec<Card>,
    },
    #[serde(rename_all = "camelCase")]
    AllCardsRevealed {
        full_hand: Vec<Card>,
    },
    #[serde(rename_all = "camelCase")]
    BetPlaced {
        player_key: PlayerKey,
        bet: Bet,
    },
    #[serde(rename_all = "camelCase")]
    CardsTraded {
        incoming: Trades,
    },
    #[serde(rename_all = "camelCase")]
    TableRoundStarted {
        leader_key: PlayerKey,
    },
    #[serde(rename_all = "camelCase")]
    CardsPlayed {
        player_key: PlayerKey,
        combination_type: CombinationKind,
        table_cards: Vec<Card>,
        remaining_count: usize,
        requested_rank: Option<Rank>,
        current_player_key: Option<PlayerKey>,
        /// Value the Phoenix stood for, in ranks (7.5 for a single on a 7).
        phoenix_value: Option<f32>,
    },
    #[serde(rename_all = "camelCase")]
    TurnPassed {
        player_key: PlayerKey,
        next_player_key: Option<PlayerKey>,
    },
    #[serde(rename_all = "camelCase")]
    BombDropped {
        player_key: PlayerKey,
    },
    #[serde(rename_all = "camelCase")]
    CardRequested {
        player_key: PlayerKey,
        rank: Rank,
    },
    #[serde(rename_all = "camelCase")]
    PendingDragonDecision {
        player_key: PlayerKey,
    },
    #[serde(rename_all = "camelCase")]
    DragonGiven {
        player_key: PlayerKey,
        receiver_key: PlayerKey,
    },
    #[serde(rename_all = "camelCase")]
    TableRoundEnded {
        winner_key: PlayerKey,
    },
    #[serde(rename_all = "camelCase")]
    GameRoundEnded {
        round_score: RoundScore,
        team02_total_score: i32,
        team13_total_score: i32,
    },
    #[serde(rename_all = "camelCase")]
    GameEnded {
        result: GameResult,
        team02_total_score: i32,
        team13_total_score: i32,
        scores: Vec<RoundScore>,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl ServerEvent {
    /// Whether the event reveals hand contents.
    pub fn is_private(&self) -> bool {
        matches!(
            self,
            ServerEvent::WaitingForJoin { .. }
                | ServerEvent::GameRoundStarted { .. }
                | ServerEvent::AllCardsRevealed { .. }
                | ServerEvent::CardsTraded { .. }
                | ServerEvent::Error { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub player_key: PlayerKey,
    pub nickname: Option<String>,
}

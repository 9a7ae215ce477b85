//! Per-session boundary between connected players and the game orchestrator.
//!
//! A session owns four seats. It validates raw intent payloads, enforces
//! join/ready bookkeeping, forwards game actions to [`GameFlow`] and routes
//! every failure back to the acting seat as an `error` event.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Serialize, Serializer};
use tracing::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::domain::{PlayerKey, Trades};
use crate::error::AppError;
use crate::errors::domain::{DomainError, RuleKind};
use crate::errors::ErrorKind;
use crate::services::game_flow::{GameFlow, GameStatus};
use crate::ws::protocol::{ClientIntent, PlayerInfo, ServerEvent};

/// Addressee of an outbound event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    Player(PlayerKey),
    All,
}

impl Recipient {
    /// Whether a player connected at `key` receives events sent here.
    pub fn includes(self, key: PlayerKey) -> bool {
        match self {
            Recipient::Player(to) => to == key,
            Recipient::All => true,
        }
    }
}

impl Serialize for Recipient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recipient::Player(key) => key.serialize(serializer),
            Recipient::All => serializer.serialize_str("all"),
        }
    }
}

/// Transport seam: whatever actually delivers events to connections.
pub trait EventSink: Send + Sync {
    fn deliver(&self, to: Recipient, event: ServerEvent);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub to: Recipient,
    pub event: ServerEvent,
}

/// Sink that collects deliveries in order until drained.
#[derive(Debug, Default)]
pub struct Outbox {
    deliveries: Mutex<Vec<Delivery>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every delivery collected so far.
    pub fn drain(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock())
    }

    /// Events a player would have received, oldest first, without draining.
    pub fn events_for(&self, key: PlayerKey) -> Vec<ServerEvent> {
        self.deliveries
            .lock()
            .iter()
            .filter(|d| d.to.includes(key))
            .map(|d| d.event.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.lock().is_empty()
    }
}

impl EventSink for Outbox {
    fn deliver(&self, to: Recipient, event: ServerEvent) {
        self.deliveries.lock().push(Delivery { to, event });
    }
}

#[derive(Debug, Clone, Default)]
struct Seat {
    connected: bool,
    nickname: Option<String>,
    ready: bool,
}

impl Seat {
    fn joined(&self) -> bool {
        self.connected && self.nickname.is_some()
    }
}

pub struct GameSession {
    seats: [Seat; 4],
    flow: GameFlow,
    sink: Arc<dyn EventSink>,
}

impl GameSession {
    pub fn new(config: GameConfig, sink: Arc<dyn EventSink>) -> Self {
        let unicast = Arc::clone(&sink);
        let broadcast = Arc::clone(&sink);
        let flow = GameFlow::new(
            config,
            Box::new(move |key, event| unicast.deliver(Recipient::Player(key), event)),
            Box::new(move |event| {
                if event.is_private() {
                    error!(?event, "private event dropped from broadcast");
                    return;
                }
                broadcast.deliver(Recipient::All, event)
            }),
        );
        Self {
            seats: Default::default(),
            flow,
            sink,
        }
    }

    pub fn flow(&self) -> &GameFlow {
        &self.flow
    }

    pub fn is_full(&self) -> bool {
        self.seats.iter().all(|s| s.connected)
    }

    pub fn is_empty(&self) -> bool {
        self.seats.iter().all(|s| !s.connected)
    }

    pub fn nickname(&self, key: PlayerKey) -> Option<&str> {
        self.seats[key.index()].nickname.as_deref()
    }

    /// Take the first free seat and tell the new connection who is present.
    pub fn connect(&mut self) -> Result<PlayerKey, AppError> {
        let index = self
            .seats
            .iter()
            .position(|s| !s.connected)
            .ok_or_else(|| DomainError::business(RuleKind::SessionFull, "The game is full"))?;
        let key = PlayerKey::from_index(index);
        self.seats[index] = Seat {
            connected: true,
            ..Seat::default()
        };
        info!(player = ?key, "seat connected");

        let present_players = PlayerKey::ALL
            .into_iter()
            .filter(|k| *k != key && self.seats[k.index()].connected)
            .map(|k| PlayerInfo {
                player_key: k,
                nickname: self.seats[k.index()].nickname.clone(),
            })
            .collect();
        self.send(
            key,
            ServerEvent::WaitingForJoin {
                player_key: key,
                winning_score: self.flow.config().winning_score,
                present_players,
            },
        );
        Ok(key)
    }

    /// Free a seat. Leaving during a game ends it for the leaver's team.
    pub fn disconnect(&mut self, key: PlayerKey) {
        let seat = std::mem::take(&mut self.seats[key.index()]);
        if !seat.connected {
            return;
        }
        warn!(player = ?key, joined = seat.nickname.is_some(), "seat disconnected");
        self.flow.on_player_left(key, seat.nickname.is_some());
    }

    /// Parse and handle a raw JSON intent.
    pub fn handle_json(&mut self, who: PlayerKey, raw: &str) {
        match serde_json::from_str::<ClientIntent>(raw) {
            Ok(intent) => self.handle(who, intent),
            Err(err) => self.reject(who, "invalid", err.into()),
        }
    }

    /// Handle an already decoded JSON intent.
    pub fn handle_value(&mut self, who: PlayerKey, value: serde_json::Value) {
        match serde_json::from_value::<ClientIntent>(value) {
            Ok(intent) => self.handle(who, intent),
            Err(err) => self.reject(who, "invalid", err.into()),
        }
    }

    /// Handle a typed intent; failures are reported to `who` only.
    pub fn handle(&mut self, who: PlayerKey, intent: ClientIntent) {
        let name = intent.name();
        debug!(player = ?who, intent = name, "intent received");
        if let Err(err) = self.dispatch(who, intent) {
            self.reject(who, name, err);
        }
    }

    fn dispatch(&mut self, who: PlayerKey, intent: ClientIntent) -> Result<(), AppError> {
        if !self.seats[who.index()].connected {
            return Err(DomainError::business(RuleKind::NotJoined, "You are not connected").into());
        }
        match intent {
            ClientIntent::JoinGame { nickname } => self.join(who, nickname),
            _ if !self.seats[who.index()].joined() => {
                Err(DomainError::business(RuleKind::NotJoined, "Join the game first").into())
            }
            ClientIntent::StartGame => self.ready(who),
            ClientIntent::PlaceBet { bet } => Ok(self.flow.place_bet(who, bet)?),
            ClientIntent::RevealAllCards => Ok(self.flow.reveal_all(who)?),
            ClientIntent::TradeCards {
                teammate_card_key,
                left_card_key,
                right_card_key,
            } => {
                let trades = Trades {
                    teammate: teammate_card_key,
                    left: left_card_key,
                    right: right_card_key,
                };
                Ok(self.flow.trade_cards(who, trades)?)
            }
            ClientIntent::ReceiveTrade => Ok(self.flow.receive_trade(who)?),
            ClientIntent::PlayCards {
                selected_card_keys,
                phoenix_alt_name,
            } => Ok(self
                .flow
                .play_cards(who, &selected_card_keys, phoenix_alt_name)?),
            ClientIntent::PassTurn => Ok(self.flow.pass_turn(who)?),
            ClientIntent::DropBomb => Ok(self.flow.drop_bomb(who)?),
            ClientIntent::RequestCard {
                requested_card_name,
            } => Ok(self.flow.request_card(who, requested_card_name)?),
            ClientIntent::GiveDragon {
                chosen_opponent_key,
            } => Ok(self.flow.give_dragon(who, chosen_opponent_key)?),
        }
    }

    fn join(&mut self, who: PlayerKey, nickname: String) -> Result<(), AppError> {
        let nickname = nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(AppError::validation("Nickname must not be empty"));
        }
        let seat = &mut self.seats[who.index()];
        if seat.nickname.is_some() {
            return Err(DomainError::business(RuleKind::AlreadyDone, "You already joined").into());
        }
        seat.nickname = Some(nickname.clone());
        info!(player = ?who, %nickname, "player joined");
        self.broadcast(ServerEvent::PlayerJoined {
            player_key: who,
            nickname,
        });
        Ok(())
    }

    /// Mark a seat ready; the game starts when all four joined seats are.
    fn ready(&mut self, who: PlayerKey) -> Result<(), AppError> {
        if self.flow.status() == GameStatus::InProgress {
            return Err(DomainError::business(
                RuleKind::GameInProgress,
                "A game is already in progress",
            )
            .into());
        }
        let seat = &mut self.seats[who.index()];
        if seat.ready {
            return Err(DomainError::business(RuleKind::AlreadyDone, "You are already ready").into());
        }
        seat.ready = true;
        self.broadcast(ServerEvent::PlayerReady { player_key: who });

        if self.seats.iter().all(|s| s.joined() && s.ready) {
            for seat in self.seats.iter_mut() {
                seat.ready = false;
            }
            self.flow.start()?;
        }
        Ok(())
    }

    fn reject(&self, who: PlayerKey, intent: &str, err: AppError) {
        match err.kind() {
            ErrorKind::InternalError => {
                error!(player = ?who, intent, error = %err, "intent failed")
            }
            _ => warn!(player = ?who, intent, error = %err, "intent rejected"),
        }
        self.send(
            who,
            ServerEvent::Error {
                kind: err.kind(),
                message: err.client_message(),
            },
        );
    }

    fn send(&self, to: PlayerKey, event: ServerEvent) {
        self.sink.deliver(Recipient::Player(to), event);
    }

    fn broadcast(&self, event: ServerEvent) {
        self.sink.deliver(Recipient::All, event);
    }
}

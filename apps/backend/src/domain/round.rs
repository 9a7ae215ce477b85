//! Round state machine: dealing, bets, full reveal and the trading protocol.
//!
//! Trick play lives in `tricks`; both operate on [`RoundState`] and leave it
//! untouched when they return an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::player::{Bet, PlayerRoundState, Trades};
use crate::domain::rules::PLAYERS;
use crate::domain::state::PlayerKey;
use crate::domain::table::TableState;
use crate::domain::{deal_hands, Card, Rank};
use crate::errors::domain::{DomainError, RuleKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundPhase {
    Trades,
    Main,
    Over,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub(super) players: [PlayerRoundState; PLAYERS],
    pub(super) table: TableState,
    pub(super) phase: RoundPhase,
    /// Seat expected to act. `None` while trades are being acknowledged,
    /// while a Dragon decision is pending and once the round is over.
    pub(super) current: Option<PlayerKey>,
    /// Active request set by a played Mahjong.
    pub(super) requested_rank: Option<Rank>,
    /// Request announced by the leader, activated when the Mahjong is played.
    pub(super) announced_rank: Option<Rank>,
    pub(super) request_used: bool,
    pub(super) finish_order: Vec<PlayerKey>,
}

pub(super) fn phase_mismatch(detail: impl Into<String>) -> DomainError {
    DomainError::business(RuleKind::PhaseMismatch, detail)
}

impl RoundState {
    /// Shuffle and deal a new round. Every player sees 8 cards.
    pub fn deal(seed: u64) -> Self {
        let [h1, h2, h3, h4] = deal_hands(seed);
        Self {
            players: [
                PlayerRoundState::dealt(PlayerKey::Player1, h1),
                PlayerRoundState::dealt(PlayerKey::Player2, h2),
                PlayerRoundState::dealt(PlayerKey::Player3, h3),
                PlayerRoundState::dealt(PlayerKey::Player4, h4),
            ],
            table: TableState::default(),
            phase: RoundPhase::Trades,
            current: None,
            requested_rank: None,
            announced_rank: None,
            request_used: false,
            finish_order: Vec::new(),
        }
    }

    /// Start directly in the main phase with the given hands, trading
    /// skipped. The Mahjong holder leads (seat 1 when nobody holds it).
    /// Seats given an empty hand count as already finished, in seat order.
    pub fn from_hands(hands: [Vec<Card>; PLAYERS]) -> Self {
        let [h1, h2, h3, h4] = hands;
        let mut round = Self {
            players: [
                PlayerRoundState::with_hand(PlayerKey::Player1, h1),
                PlayerRoundState::with_hand(PlayerKey::Player2, h2),
                PlayerRoundState::with_hand(PlayerKey::Player3, h3),
                PlayerRoundState::with_hand(PlayerKey::Player4, h4),
            ],
            ..Self::deal(0)
        };
        round.phase = RoundPhase::Main;
        round.finish_order = PlayerKey::ALL
            .into_iter()
            .filter(|k| !round.is_active(*k))
            .collect();
        round.current = Some(round.mahjong_holder().unwrap_or(PlayerKey::Player1));
        round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn player(&self, key: PlayerKey) -> &PlayerRoundState {
        &self.players[key.index()]
    }

    pub(super) fn player_mut(&mut self, key: PlayerKey) -> &mut PlayerRoundState {
        &mut self.players[key.index()]
    }

    pub fn players(&self) -> &[PlayerRoundState; PLAYERS] {
        &self.players
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn current_player(&self) -> Option<PlayerKey> {
        self.current
    }

    pub fn requested_rank(&self) -> Option<Rank> {
        self.requested_rank
    }

    pub(crate) fn announced_rank(&self) -> Option<Rank> {
        self.announced_rank
    }

    /// Players in the order they emptied their hands.
    pub fn finish_order(&self) -> &[PlayerKey] {
        &self.finish_order
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    /// Main phase with every player having acknowledged their trades.
    pub fn in_play(&self) -> bool {
        self.phase == RoundPhase::Main && self.players.iter().all(|p| p.received_trades)
    }

    pub fn mahjong_holder(&self) -> Option<PlayerKey> {
        self.players
            .iter()
            .find(|p| p.holds(&Card::MAHJONG))
            .map(|p| p.key)
    }

    pub fn is_active(&self, key: PlayerKey) -> bool {
        !self.player(key).hand.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.hand.is_empty()).count()
    }

    /// First seat after `key` in turn order that still holds cards.
    pub fn next_active_after(&self, key: PlayerKey) -> Option<PlayerKey> {
        (1..=PLAYERS as i8)
            .map(|delta| key.offset(delta))
            .find(|k| self.is_active(*k))
    }

    pub fn place_bet(&mut self, who: PlayerKey, bet: Bet) -> Result<(), DomainError> {
        if self.phase == RoundPhase::Over {
            return Err(phase_mismatch("The round is over"));
        }
        let phase = self.phase;
        let player = self.player_mut(who);
        if player.bet != Bet::None {
            return Err(DomainError::business(
                RuleKind::AlreadyDone,
                "A bet was already placed",
            ));
        }
        match bet {
            Bet::None => {
                return Err(DomainError::business(
                    RuleKind::InvalidBet,
                    "No bet selected",
                ));
            }
            Bet::GrandTichu if phase != RoundPhase::Trades || player.revealed => {
                return Err(DomainError::business(
                    RuleKind::InvalidBet,
                    "Grand Tichu must be called before revealing all cards",
                ));
            }
            Bet::Tichu if !player.revealed || player.has_played => {
                return Err(DomainError::business(
                    RuleKind::InvalidBet,
                    "Tichu can only be called with all 14 cards before playing",
                ));
            }
            _ => {}
        }
        player.bet = bet;
        debug!(player = ?who, ?bet, "bet placed");
        Ok(())
    }

    /// Reveal the remaining six cards. Returns the full hand.
    pub fn reveal_all(&mut self, who: PlayerKey) -> Result<Vec<Card>, DomainError> {
        if self.phase != RoundPhase::Trades {
            return Err(phase_mismatch("Cards can only be revealed before trading"));
        }
        let player = self.player_mut(who);
        player.reveal()?;
        debug!(player = ?who, "all cards revealed");
        Ok(player.hand.clone())
    }

    /// Submit the three outgoing cards. Returns `true` when this was the last
    /// submission and trades were resolved.
    pub fn submit_trades(&mut self, who: PlayerKey, trades: Trades) -> Result<bool, DomainError> {
        if self.phase != RoundPhase::Trades {
            return Err(phase_mismatch("Trading is over"));
        }
        let player = self.player(who);
        if !player.revealed {
            return Err(DomainError::business(
                RuleKind::InvalidTrade,
                "Reveal all cards before trading",
            ));
        }
        if player.outgoing.is_some() {
            return Err(DomainError::business(
                RuleKind::AlreadyDone,
                "Cards were already traded",
            ));
        }
        let [a, b, c] = trades.cards();
        if a == b || a == c || b == c {
            return Err(DomainError::business(
                RuleKind::InvalidTrade,
                "Trade three different cards",
            ));
        }
        if !player.holds_all(&trades.cards()) {
            return Err(DomainError::business(
                RuleKind::CardNotInHand,
                "Card not in hand",
            ));
        }

        self.player_mut(who).outgoing = Some(trades);
        debug!(player = ?who, "trades submitted");

        if self.players.iter().all(|p| p.outgoing.is_some()) {
            self.resolve_trades()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn resolve_trades(&mut self) -> Result<(), DomainError> {
        let outgoing = |round: &Self, key: PlayerKey| {
            round
                .player(key)
                .outgoing
                .ok_or_else(|| DomainError::internal("trades resolved before all were sent"))
        };

        let mut incoming = Vec::with_capacity(PLAYERS);
        for key in PlayerKey::ALL {
            incoming.push(Trades {
                teammate: outgoing(self, key.teammate())?.teammate,
                left: outgoing(self, key.left())?.right,
                right: outgoing(self, key.right())?.left,
            });
        }

        for (key, received) in PlayerKey::ALL.into_iter().zip(incoming) {
            let sent = outgoing(self, key)?;
            let player = self.player_mut(key);
            player.remove_cards(&sent.cards())?;
            player.hand.extend(received.cards());
            player.incoming = Some(received);
        }

        self.phase = RoundPhase::Main;
        self.current = None;
        debug!("trades resolved");
        Ok(())
    }

    /// Acknowledge the received cards. Returns the first leader once all four
    /// players have acknowledged.
    pub fn acknowledge_trades(&mut self, who: PlayerKey) -> Result<Option<PlayerKey>, DomainError> {
        if self.phase != RoundPhase::Main {
            return Err(phase_mismatch("Trades are not resolved yet"));
        }
        let player = self.player_mut(who);
        if player.received_trades {
            return Err(DomainError::business(
                RuleKind::AlreadyDone,
                "Trades were already received",
            ));
        }
        player.received_trades = true;

        if !self.in_play() {
            return Ok(None);
        }
        let leader = self
            .mahjong_holder()
            .ok_or_else(|| DomainError::internal("no player holds the Mahjong"))?;
        self.current = Some(leader);
        debug!(leader = ?leader, "first trick opens");
        Ok(Some(leader))
    }
}

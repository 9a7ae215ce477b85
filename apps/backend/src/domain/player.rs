//! Per-player state for one round.

use serde::{Deserialize, Serialize};

use crate::domain::rules::PARTIAL_HAND_SIZE;
use crate::domain::state::PlayerKey;
use crate::domain::Card;
use crate::errors::domain::{DomainError, RuleKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bet {
    #[default]
    None,
    Tichu,
    GrandTichu,
}

/// Three cards, one per other seat. Used both for the cards a player sends
/// (keyed by destination) and the cards they receive (keyed by source).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trades {
    pub teammate: Card,
    pub left: Card,
    pub right: Card,
}

impl Trades {
    pub fn cards(&self) -> [Card; 3] {
        [self.teammate, self.left, self.right]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRoundState {
    pub(super) key: PlayerKey,
    pub(super) hand: Vec<Card>,
    /// Cards dealt but not yet revealed to the player.
    pub(super) hidden: Vec<Card>,
    pub(super) revealed: bool,
    pub(super) bet: Bet,
    pub(super) pending_bomb: bool,
    pub(super) outgoing: Option<Trades>,
    pub(super) incoming: Option<Trades>,
    pub(super) received_trades: bool,
    pub(super) has_played: bool,
    /// Cards of the tricks this player collected.
    pub(super) won: Vec<Card>,
}

impl PlayerRoundState {
    /// Fresh state from a 14-card deal: the first 8 cards are visible.
    pub(super) fn dealt(key: PlayerKey, mut cards: Vec<Card>) -> Self {
        let hidden = cards.split_off(PARTIAL_HAND_SIZE.min(cards.len()));
        Self {
            key,
            hand: cards,
            hidden,
            revealed: false,
            bet: Bet::None,
            pending_bomb: false,
            outgoing: None,
            incoming: None,
            received_trades: false,
            has_played: false,
            won: Vec::new(),
        }
    }

    /// State with the whole hand visible and trading already done.
    pub(super) fn with_hand(key: PlayerKey, hand: Vec<Card>) -> Self {
        Self {
            hand,
            revealed: true,
            received_trades: true,
            ..Self::dealt(key, Vec::new())
        }
    }

    pub fn key(&self) -> PlayerKey {
        self.key
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn bet(&self) -> Bet {
        self.bet
    }

    pub fn has_revealed(&self) -> bool {
        self.revealed
    }

    pub fn has_sent_trades(&self) -> bool {
        self.outgoing.is_some()
    }

    pub fn has_received_trades(&self) -> bool {
        self.received_trades
    }

    pub fn outgoing_trades(&self) -> Option<&Trades> {
        self.outgoing.as_ref()
    }

    pub fn incoming_trades(&self) -> Option<&Trades> {
        self.incoming.as_ref()
    }

    pub fn pending_bomb(&self) -> bool {
        self.pending_bomb
    }

    pub fn has_played(&self) -> bool {
        self.has_played
    }

    pub fn won_cards(&self) -> &[Card] {
        &self.won
    }

    /// Out of the round: revealed and no cards left.
    pub fn is_out(&self) -> bool {
        self.revealed && self.hand.is_empty()
    }

    pub fn holds(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    pub fn holds_all(&self, cards: &[Card]) -> bool {
        cards.iter().all(|c| self.holds(c))
    }

    pub(super) fn reveal(&mut self) -> Result<(), DomainError> {
        if self.revealed {
            return Err(DomainError::business(
                RuleKind::AlreadyDone,
                "All cards are already revealed",
            ));
        }
        self.hand.append(&mut self.hidden);
        self.revealed = true;
        Ok(())
    }

    pub(super) fn remove_cards(&mut self, cards: &[Card]) -> Result<(), DomainError> {
        if !self.holds_all(cards) {
            return Err(DomainError::business(
                RuleKind::CardNotInHand,
                "Card not in hand",
            ));
        }
        self.hand.retain(|c| !cards.contains(c));
        Ok(())
    }
}

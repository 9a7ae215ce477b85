//! The shared table: current top combination and the open trick.

use crate::domain::combinations::Combination;
use crate::domain::state::PlayerKey;
use crate::domain::{card_points, Card};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub(super) combination: Option<Combination>,
    /// Cards of the top play.
    pub(super) cards: Vec<Card>,
    pub(super) owner: Option<PlayerKey>,
    /// Every card played into the open trick.
    pub(super) trick: Vec<Card>,
    pub(super) pending_dragon: bool,
    pub(super) pending_bomb: bool,
    /// Consecutive passes since the last play.
    pub(super) passes: usize,
}

impl TableState {
    pub fn is_empty(&self) -> bool {
        self.combination.is_none()
    }

    pub fn combination(&self) -> Option<&Combination> {
        self.combination.as_ref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn owner(&self) -> Option<PlayerKey> {
        self.owner
    }

    pub fn trick_cards(&self) -> &[Card] {
        &self.trick
    }

    pub fn trick_points(&self) -> i32 {
        card_points(&self.trick)
    }

    pub fn pending_dragon(&self) -> bool {
        self.pending_dragon
    }

    pub fn pending_bomb(&self) -> bool {
        self.pending_bomb
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub(super) fn place(&mut self, owner: PlayerKey, cards: Vec<Card>, combination: Combination) {
        self.trick.extend_from_slice(&cards);
        self.cards = cards;
        self.combination = Some(combination);
        self.owner = Some(owner);
        self.passes = 0;
    }

    /// Clear the table and hand back the trick's cards.
    pub(super) fn take_trick(&mut self) -> Vec<Card> {
        std::mem::take(self).trick
    }
}

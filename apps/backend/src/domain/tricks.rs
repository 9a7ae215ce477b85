//! Trick play in the main phase: plays, passes, bombs, the Mahjong request
//! and the Dragon gift.

use tracing::{debug, info};

use crate::domain::combinations::{beats, classify, Combination};
use crate::domain::round::{phase_mismatch, RoundPhase, RoundState};
use crate::domain::search::{find_requested_bomb, find_requested_play, has_playable_bomb};
use crate::domain::state::PlayerKey;
use crate::domain::{Card, Rank};
use crate::errors::domain::{DomainError, RuleKind};

/// How a trick was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickEnd {
    /// Owner of the trick's top play.
    pub winner: PlayerKey,
    /// Player whose pile received the trick's cards.
    pub collector: PlayerKey,
    /// Leader of the next trick; `None` when the round is over.
    pub next_leader: Option<PlayerKey>,
}

/// Result of an accepted play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub combination: Combination,
    /// The played cards, sorted.
    pub cards: Vec<Card>,
    /// Cards left in the player's hand.
    pub remaining: usize,
    /// Request in force after this play.
    pub requested_rank: Option<Rank>,
    /// A bomb played while it was not the player's turn.
    pub out_of_turn: bool,
    /// Set when the play closed the trick (Dog lead or end of round).
    pub trick_end: Option<TrickEnd>,
    pub next_player: Option<PlayerKey>,
    pub round_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Passed { next: PlayerKey },
    TrickEnded(TrickEnd),
    /// The trick was won with the Dragon; its owner must give it away.
    DragonPending { owner: PlayerKey },
}

fn business(kind: RuleKind, detail: impl Into<String>) -> DomainError {
    DomainError::business(kind, detail)
}

impl RoundState {
    fn require_in_play(&self) -> Result<(), DomainError> {
        if self.phase != RoundPhase::Main {
            return Err(phase_mismatch("Cards can only be played in the main phase"));
        }
        if !self.in_play() {
            return Err(phase_mismatch(
                "Waiting for all players to receive their trades",
            ));
        }
        if self.table.pending_dragon {
            return Err(phase_mismatch("Waiting for the Dragon to be given"));
        }
        Ok(())
    }

    fn require_turn(&self, who: PlayerKey) -> Result<(), DomainError> {
        if self.current != Some(who) {
            return Err(business(RuleKind::OutOfTurn, "It is not your turn"));
        }
        Ok(())
    }

    /// Play a set of cards. Only a bomb may be played out of turn, and only
    /// on a non-empty table with no bomb pending.
    pub fn play(
        &mut self,
        who: PlayerKey,
        cards: &[Card],
        phoenix_alt: Option<Rank>,
    ) -> Result<PlayOutcome, DomainError> {
        self.require_in_play()?;

        let table = self.table.combination.as_ref();
        let combination = classify(cards, table, phoenix_alt)?;
        let player = self.player(who);
        if !player.holds_all(cards) {
            return Err(business(RuleKind::CardNotInHand, "Card not in hand"));
        }

        let own_turn = self.current == Some(who);
        if !own_turn {
            let bomb_allowed =
                combination.is_bomb() && !self.table.is_empty() && !self.table.pending_bomb;
            if !bomb_allowed {
                return Err(business(RuleKind::OutOfTurn, "It is not your turn"));
            }
        }

        if let Some(top) = table {
            if !beats(&combination, top) {
                return Err(business(
                    RuleKind::DoesNotBeatTable,
                    "Your play does not beat the table",
                ));
            }
        }

        if own_turn {
            if player.pending_bomb && !combination.is_bomb() {
                return Err(business(
                    RuleKind::InvalidCombination,
                    "You must play the bomb you dropped",
                ));
            }
            if table.is_none() && self.announced_rank.is_some() && !cards.contains(&Card::MAHJONG)
            {
                return Err(business(
                    RuleKind::InvalidCombination,
                    "Lead with the Mahjong to make your request",
                ));
            }
            if let Some(rank) = self.requested_rank {
                if !cards.iter().any(|c| c.is_normal_of(rank)) {
                    let available = if player.pending_bomb {
                        find_requested_bomb(&player.hand, rank, table)
                    } else {
                        find_requested_play(&player.hand, rank, table)
                    };
                    if available.is_some() {
                        return Err(business(
                            RuleKind::MustPlayRequestedCard,
                            format!("You must play the requested {rank}"),
                        ));
                    }
                }
            }
        }

        // Validation done; apply.
        let mut played = cards.to_vec();
        played.sort();

        let player = self.player_mut(who);
        player.remove_cards(cards)?;
        player.has_played = true;
        let remaining = player.hand.len();
        if combination.is_bomb() {
            player.pending_bomb = false;
            self.table.pending_bomb = false;
        }

        if let Some(rank) = self.requested_rank {
            if cards.iter().any(|c| c.is_normal_of(rank)) {
                debug!(%rank, "requested card played");
                self.requested_rank = None;
            }
        }
        if cards.contains(&Card::MAHJONG) {
            if let Some(rank) = self.announced_rank.take() {
                self.requested_rank = Some(rank);
            }
        }

        self.table.place(who, played.clone(), combination.clone());
        if remaining == 0 {
            self.finish_order.push(who);
            info!(player = ?who, place = self.finish_order.len(), "player finished");
        }
        debug!(
            player = ?who,
            kind = ?combination.kind(),
            length = combination.length(),
            out_of_turn = !own_turn,
            "cards played"
        );

        let mut outcome = PlayOutcome {
            combination,
            cards: played,
            remaining,
            requested_rank: self.requested_rank,
            out_of_turn: !own_turn,
            trick_end: None,
            next_player: None,
            round_over: false,
        };

        if self.round_finished() {
            outcome.trick_end = self.end_round();
            outcome.requested_rank = None;
            outcome.round_over = true;
            return Ok(outcome);
        }

        if outcome.combination.is_dog() {
            let teammate = who.teammate();
            let leader = if self.is_active(teammate) {
                Some(teammate)
            } else {
                self.next_active_after(teammate)
            };
            let trick = self.table.take_trick();
            self.player_mut(who).won.extend(trick);
            self.current = leader;
            outcome.trick_end = Some(TrickEnd {
                winner: who,
                collector: who,
                next_leader: leader,
            });
            outcome.next_player = leader;
            return Ok(outcome);
        }

        self.current = self.next_active_after(who);
        outcome.next_player = self.current;
        Ok(outcome)
    }

    /// Pass on the current table. Not allowed when leading, after dropping a
    /// bomb, or while holding a legal play with the requested rank.
    pub fn pass(&mut self, who: PlayerKey) -> Result<PassOutcome, DomainError> {
        self.require_in_play()?;
        self.require_turn(who)?;

        let Some(top) = self.table.combination.as_ref() else {
            return Err(business(
                RuleKind::InvalidCombination,
                "You cannot pass when leading",
            ));
        };
        let dragon_on_top = top.is_dragon();
        let player = self.player(who);
        if player.pending_bomb {
            return Err(business(
                RuleKind::InvalidCombination,
                "You must play the bomb you dropped",
            ));
        }
        if let Some(rank) = self.requested_rank {
            if find_requested_play(&player.hand, rank, Some(top)).is_some() {
                return Err(business(
                    RuleKind::MustPlayRequestedCard,
                    format!("You must play the requested {rank}"),
                ));
            }
        }
        let owner = self
            .table
            .owner
            .ok_or_else(|| DomainError::internal("table has a combination but no owner"))?;

        self.table.passes += 1;
        let contenders = PlayerKey::ALL
            .into_iter()
            .filter(|k| *k != owner && self.is_active(*k))
            .count();

        if self.table.passes < contenders {
            let next = self
                .next_active_after(who)
                .ok_or_else(|| DomainError::internal("no active player after a pass"))?;
            self.current = Some(next);
            debug!(player = ?who, next = ?next, "turn passed");
            return Ok(PassOutcome::Passed { next });
        }

        if dragon_on_top {
            self.table.pending_dragon = true;
            self.current = None;
            debug!(owner = ?owner, "dragon trick awaits a receiver");
            return Ok(PassOutcome::DragonPending { owner });
        }

        Ok(PassOutcome::TrickEnded(self.close_trick(owner, owner)))
    }

    /// Announce a bomb. The bomber takes the turn and must play a bomb next.
    pub fn drop_bomb(&mut self, who: PlayerKey) -> Result<(), DomainError> {
        self.require_in_play()?;
        if self.table.pending_bomb {
            return Err(business(RuleKind::AlreadyDone, "A bomb is already pending"));
        }
        let player = self.player(who);
        if player.hand.is_empty() {
            return Err(phase_mismatch("You have no cards left"));
        }
        if self.table.is_empty() {
            self.require_turn(who)?;
            if self.announced_rank.is_some() {
                return Err(business(
                    RuleKind::InvalidCombination,
                    "Lead with the Mahjong to make your request",
                ));
            }
        }
        if !has_playable_bomb(&player.hand, self.table.combination.as_ref()) {
            return Err(business(
                RuleKind::InvalidCombination,
                "You have no bomb that beats the table",
            ));
        }

        self.table.pending_bomb = true;
        self.player_mut(who).pending_bomb = true;
        self.current = Some(who);
        debug!(player = ?who, "bomb dropped");
        Ok(())
    }

    /// Announce the rank the Mahjong will request. Only the leader holding
    /// the Mahjong may do so, once per round.
    pub fn request_card(&mut self, who: PlayerKey, rank: Rank) -> Result<(), DomainError> {
        self.require_in_play()?;
        self.require_turn(who)?;
        if !self.table.is_empty() {
            return Err(phase_mismatch("A card can only be requested when leading"));
        }
        if !self.player(who).holds(&Card::MAHJONG) {
            return Err(business(
                RuleKind::CardNotInHand,
                "Only the Mahjong holder can request a card",
            ));
        }
        if self.request_used {
            return Err(business(
                RuleKind::AlreadyDone,
                "A card was already requested this round",
            ));
        }
        self.announced_rank = Some(rank);
        self.request_used = true;
        debug!(player = ?who, %rank, "card requested");
        Ok(())
    }

    /// Give a Dragon-won trick to an opponent.
    pub fn give_dragon(&mut self, who: PlayerKey, to: PlayerKey) -> Result<TrickEnd, DomainError> {
        if self.phase != RoundPhase::Main || !self.table.pending_dragon {
            return Err(phase_mismatch("No Dragon decision is pending"));
        }
        let owner = self
            .table
            .owner
            .ok_or_else(|| DomainError::internal("pending dragon without an owner"))?;
        if who != owner {
            return Err(business(
                RuleKind::OutOfTurn,
                "Only the Dragon's owner decides who receives the trick",
            ));
        }
        if !to.is_opponent_of(who) {
            return Err(business(
                RuleKind::InvalidTarget,
                "The Dragon trick must go to an opponent",
            ));
        }
        debug!(owner = ?owner, receiver = ?to, "dragon given");
        Ok(self.close_trick(owner, to))
    }

    fn close_trick(&mut self, winner: PlayerKey, collector: PlayerKey) -> TrickEnd {
        let points = self.table.trick_points();
        let trick = self.table.take_trick();
        self.player_mut(collector).won.extend(trick);
        let leader = if self.is_active(winner) {
            Some(winner)
        } else {
            self.next_active_after(winner)
        };
        self.current = leader;
        debug!(
            winner = ?winner,
            collector = ?collector,
            leader = ?leader,
            points,
            "trick closed"
        );
        TrickEnd {
            winner,
            collector,
            next_leader: leader,
        }
    }

    /// Three players out, or the first two finishers are teammates.
    fn round_finished(&self) -> bool {
        match self.finish_order.as_slice() {
            [first, second, ..] if first.team() == second.team() => true,
            _ => self.active_count() <= 1,
        }
    }

    /// Close the round. The open trick goes to its owner, or to the owner's
    /// left opponent when it was won with the Dragon.
    fn end_round(&mut self) -> Option<TrickEnd> {
        let owner = self.table.owner;
        let dragon = self.table.combination.as_ref().is_some_and(|c| c.is_dragon());
        let trick = self.table.take_trick();

        self.phase = RoundPhase::Over;
        self.current = None;
        self.requested_rank = None;
        self.announced_rank = None;
        for player in self.players.iter_mut() {
            player.pending_bomb = false;
        }
        info!(finish_order = ?self.finish_order, "round over");

        let winner = owner?;
        let collector = if dragon { winner.left() } else { winner };
        self.player_mut(collector).won.extend(trick);
        Some(TrickEnd {
            winner,
            collector,
            next_leader: None,
        })
    }
}

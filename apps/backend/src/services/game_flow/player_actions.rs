use tracing::debug;

use super::GameFlow;
use crate::domain::{Bet, Card, PassOutcome, PlayerKey, Rank, Strength, Trades, TrickEnd};
use crate::errors::domain::DomainError;
use crate::ws::protocol::ServerEvent;

impl GameFlow {
    pub fn place_bet(&mut self, who: PlayerKey, bet: Bet) -> Result<(), DomainError> {
        self.round_mut()?.place_bet(who, bet)?;
        self.publish(ServerEvent::BetPlaced {
            player_key: who,
            bet,
        });
        Ok(())
    }

    /// Reveal the last six cards; only the owner learns them.
    pub fn reveal_all(&mut self, who: PlayerKey) -> Result<(), DomainError> {
        let full_hand = self.round_mut()?.reveal_all(who)?;
        self.send(who, ServerEvent::AllCardsRevealed { full_hand });
        Ok(())
    }

    /// Submit a player's three outgoing cards. When the fourth submission
    /// arrives each player is told what they received.
    pub fn trade_cards(&mut self, who: PlayerKey, trades: Trades) -> Result<(), DomainError> {
        let round = self.round_mut()?;
        if !round.submit_trades(who, trades)? {
            return Ok(());
        }

        let mut received = Vec::with_capacity(PlayerKey::ALL.len());
        for key in PlayerKey::ALL {
            let incoming = round
                .player(key)
                .incoming_trades()
                .copied()
                .ok_or_else(|| DomainError::internal("trades resolved without incoming cards"))?;
            received.push((key, incoming));
        }
        for (key, incoming) in received {
            self.send(key, ServerEvent::CardsTraded { incoming });
        }
        Ok(())
    }

    /// Acknowledge the incoming cards. The first trick starts once all four
    /// seats have acknowledged.
    pub fn receive_trade(&mut self, who: PlayerKey) -> Result<(), DomainError> {
        if let Some(leader) = self.round_mut()?.acknowledge_trades(who)? {
            self.publish(ServerEvent::TableRoundStarted { leader_key: leader });
        }
        Ok(())
    }

    pub fn play_cards(
        &mut self,
        who: PlayerKey,
        cards: &[Card],
        phoenix_alt: Option<Rank>,
    ) -> Result<(), DomainError> {
        let outcome = self.round_mut()?.play(who, cards, phoenix_alt)?;
        if outcome.out_of_turn {
            debug!(player = ?who, "bomb played out of turn");
        }

        self.publish(ServerEvent::CardsPlayed {
            player_key: who,
            combination_type: outcome.combination.kind(),
            table_cards: outcome.cards,
            remaining_count: outcome.remaining,
            requested_rank: outcome.requested_rank,
            current_player_key: outcome.next_player,
            phoenix_value: outcome.combination.phoenix_as().map(Strength::as_rank_value),
        });

        if let Some(end) = outcome.trick_end {
            self.publish(ServerEvent::TableRoundEnded {
                winner_key: end.winner,
            });
            if !outcome.round_over {
                self.announce_leader(&end);
            }
        }
        if outcome.round_over {
            self.finish_round()?;
        }
        Ok(())
    }

    pub fn pass_turn(&mut self, who: PlayerKey) -> Result<(), DomainError> {
        match self.round_mut()?.pass(who)? {
            PassOutcome::Passed { next } => {
                self.publish(ServerEvent::TurnPassed {
                    player_key: who,
                    next_player_key: Some(next),
                });
            }
            PassOutcome::TrickEnded(end) => {
                self.publish(ServerEvent::TurnPassed {
                    player_key: who,
                    next_player_key: end.next_leader,
                });
                self.publish(ServerEvent::TableRoundEnded {
                    winner_key: end.winner,
                });
                self.announce_leader(&end);
            }
            PassOutcome::DragonPending { owner } => {
                self.publish(ServerEvent::TurnPassed {
                    player_key: who,
                    next_player_key: None,
                });
                self.publish(ServerEvent::PendingDragonDecision { player_key: owner });
            }
        }
        Ok(())
    }

    pub fn drop_bomb(&mut self, who: PlayerKey) -> Result<(), DomainError> {
        self.round_mut()?.drop_bomb(who)?;
        self.publish(ServerEvent::BombDropped { player_key: who });
        Ok(())
    }

    pub fn request_card(&mut self, who: PlayerKey, rank: Rank) -> Result<(), DomainError> {
        self.round_mut()?.request_card(who, rank)?;
        self.publish(ServerEvent::CardRequested {
            player_key: who,
            rank,
        });
        Ok(())
    }

    pub fn give_dragon(&mut self, who: PlayerKey, to: PlayerKey) -> Result<(), DomainError> {
        let end = self.round_mut()?.give_dragon(who, to)?;
        self.publish(ServerEvent::DragonGiven {
            player_key: who,
            receiver_key: to,
        });
        self.publish(ServerEvent::TableRoundEnded {
            winner_key: end.winner,
        });
        self.announce_leader(&end);
        Ok(())
    }

    fn announce_leader(&self, end: &TrickEnd) {
        if let Some(leader) = end.next_leader {
            self.publish(ServerEvent::TableRoundStarted { leader_key: leader });
        }
    }
}

//! Domain layer: pure game logic types and helpers.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod combinations;
pub mod dealing;
pub mod player;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod search;
pub mod seed_derivation;
pub mod state;
pub mod table;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_combinations;
#[cfg(test)]
mod tests_props_trades;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_trades;

// Re-exports for ergonomics
pub use cards_parsing::try_parse_cards;
pub use cards_types::{card_points, Card, Rank, Special, Suit};
pub use combinations::{beats, classify, compare, Combination, CombinationKind, Strength};
pub use dealing::{deal_hands, full_deck};
pub use player::{Bet, PlayerRoundState, Trades};
pub use round::{RoundPhase, RoundState};
pub use scoring::{score_round, RoundScore};
pub use seed_derivation::derive_dealing_seed;
pub use state::{PlayerKey, Team};
pub use table::TableState;
pub use tricks::{PassOutcome, PlayOutcome, TrickEnd};

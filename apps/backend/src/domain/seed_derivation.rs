//! RNG seed derivation utilities for deterministic game behavior.

/// Derive a seed for dealing cards in a round.
///
/// Same game seed + round number always yields the same deal; different
/// rounds of the same game get different deals.
pub fn derive_dealing_seed(game_seed: u64, round_no: u32) -> u64 {
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

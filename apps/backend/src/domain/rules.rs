pub const PLAYERS: usize = 4;
pub const DECK_SIZE: usize = 56;
pub const HAND_SIZE: usize = 14;
/// Cards visible before a player asks for the full reveal.
pub const PARTIAL_HAND_SIZE: usize = 8;

pub const MIN_STRAIGHT_LEN: usize = 5;
pub const MIN_SEQUENCE_LEN: usize = 4;
pub const FULL_HOUSE_LEN: usize = 5;

/// Card points available in one round.
pub const ROUND_POINTS: i32 = 100;
pub const DOUBLE_WIN_POINTS: i32 = 200;
pub const TICHU_POINTS: i32 = 100;
pub const GRAND_TICHU_POINTS: i32 = 200;

pub const DEFAULT_WINNING_SCORE: i32 = 1000;

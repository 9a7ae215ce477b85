use serde::{Deserialize, Serialize};

use crate::domain::rules::PLAYERS;

/// The four fixed seats. Wire form is "player1".."player4".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKey {
    Player1,
    Player2,
    Player3,
    Player4,
}

/// Partnerships: seats 1 & 3 against seats 2 & 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "TEAM_02")]
    Team02,
    #[serde(rename = "TEAM_13")]
    Team13,
}

/// Seat / turn math helpers (4 fixed seats).
///
/// Play proceeds to the right (+1). The left opponent sits at -1, the
/// teammate at +2.
impl PlayerKey {
    pub const ALL: [PlayerKey; PLAYERS] = [
        PlayerKey::Player1,
        PlayerKey::Player2,
        PlayerKey::Player3,
        PlayerKey::Player4,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> PlayerKey {
        Self::ALL[index % PLAYERS]
    }

    #[inline]
    pub fn offset(self, delta: i8) -> PlayerKey {
        let seat = self.index() as i16 + delta as i16;
        Self::from_index(seat.rem_euclid(PLAYERS as i16) as usize)
    }

    /// Next seat in turn order.
    #[inline]
    pub fn next(self) -> PlayerKey {
        self.offset(1)
    }

    #[inline]
    pub fn teammate(self) -> PlayerKey {
        self.offset(2)
    }

    #[inline]
    pub fn left(self) -> PlayerKey {
        self.offset(-1)
    }

    #[inline]
    pub fn right(self) -> PlayerKey {
        self.offset(1)
    }

    pub fn team(self) -> Team {
        match self {
            PlayerKey::Player1 | PlayerKey::Player3 => Team::Team02,
            PlayerKey::Player2 | PlayerKey::Player4 => Team::Team13,
        }
    }

    pub fn is_opponent_of(self, other: PlayerKey) -> bool {
        self.team() != other.team()
    }
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Team02 => Team::Team13,
            Team::Team13 => Team::Team02,
        }
    }
}

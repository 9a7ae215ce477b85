//! Core card-related types: Card, Rank, Suit, Special

use std::cmp::Ordering;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Black,
    Blue,
    Green,
    Red,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Black, Suit::Blue, Suit::Green, Suit::Red];
}

/// Normal card ranks. Discriminants are the face values used for ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.value() == value)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Special {
    Mahjong,
    Dog,
    Phoenix,
    Dragon,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Card {
    Normal { suit: Suit, rank: Rank },
    Special(Special),
}

impl Card {
    pub const MAHJONG: Card = Card::Special(Special::Mahjong);
    pub const DOG: Card = Card::Special(Special::Dog);
    pub const PHOENIX: Card = Card::Special(Special::Phoenix);
    pub const DRAGON: Card = Card::Special(Special::Dragon);

    pub const fn normal(suit: Suit, rank: Rank) -> Card {
        Card::Normal { suit, rank }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Normal { rank, .. } => Some(*rank),
            Card::Special(_) => None,
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Normal { suit, .. } => Some(*suit),
            Card::Special(_) => None,
        }
    }

    pub fn is_normal_of(&self, wanted: Rank) -> bool {
        self.rank() == Some(wanted)
    }

    /// Trick points carried by this card.
    pub fn points(&self) -> i32 {
        match self {
            Card::Normal {
                rank: Rank::Five, ..
            } => 5,
            Card::Normal {
                rank: Rank::Ten | Rank::King,
                ..
            } => 10,
            Card::Special(Special::Dragon) => 25,
            Card::Special(Special::Phoenix) => -25,
            _ => 0,
        }
    }

    /// Display order: Dog, Mahjong, 2..A, Phoenix, Dragon.
    fn sort_value(&self) -> u8 {
        match self {
            Card::Special(Special::Dog) => 0,
            Card::Special(Special::Mahjong) => 1,
            Card::Normal { rank, .. } => rank.value(),
            Card::Special(Special::Phoenix) => 15,
            Card::Special(Special::Dragon) => 16,
        }
    }
}

/// Sum of trick points of a set of cards.
pub fn card_points(cards: &[Card]) -> i32 {
    cards.iter().map(Card::points).sum()
}

// Note: Ord on Card is only for stable sorting of hands and views.
// Combination strength lives in `combinations`.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_value()
            .cmp(&other.sort_value())
            .then_with(|| self.suit().cmp(&other.suit()))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

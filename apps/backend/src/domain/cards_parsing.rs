//! Card keys: parsing from and formatting to the stable wire identifiers
//! (e.g. "red_10", "black_A", "phoenix").

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Special, Suit};
use crate::errors::domain::{DomainError, RuleKind};

impl Rank {
    /// Short name used in card keys and card requests ("2".."10", "J", "Q", "K", "A").
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl Suit {
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Black => "black",
            Suit::Blue => "blue",
            Suit::Green => "green",
            Suit::Red => "red",
        }
    }
}

impl Special {
    pub const fn key(self) -> &'static str {
        match self {
            Special::Mahjong => "mahjong",
            Special::Dog => "dogs",
            Special::Phoenix => "phoenix",
            Special::Dragon => "dragon",
        }
    }
}

fn parse_error(what: &str, raw: &str) -> DomainError {
    DomainError::business(RuleKind::InvalidCard, format!("Invalid {what}: '{raw}'"))
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .iter()
            .copied()
            .find(|r| r.name() == s)
            .ok_or_else(|| parse_error("card name", s))
    }
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .iter()
            .copied()
            .find(|suit| suit.name() == s)
            .ok_or_else(|| parse_error("suit", s))
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for special in [
            Special::Mahjong,
            Special::Dog,
            Special::Phoenix,
            Special::Dragon,
        ] {
            if s == special.key() {
                return Ok(Card::Special(special));
            }
        }
        let (suit, rank) = s.split_once('_').ok_or_else(|| parse_error("card key", s))?;
        let suit = suit.parse::<Suit>().map_err(|_| parse_error("card key", s))?;
        let rank = rank.parse::<Rank>().map_err(|_| parse_error("card key", s))?;
        Ok(Card::normal(suit, rank))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Normal { suit, rank } => write!(f, "{}_{}", suit.name(), rank.name()),
            Card::Special(special) => f.write_str(special.key()),
        }
    }
}

/// Non-panicking helper to parse card keys into Card instances.
pub fn try_parse_cards<I, S>(keys: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

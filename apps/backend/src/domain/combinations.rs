//! Combination classification and comparison.
//!
//! A [`Combination`] is only ever produced by [`classify`], so every value of
//! the type satisfies its shape. Effective ranks (Phoenix substitution,
//! Mahjong as 1) are resolved once at classification time and stored on the
//! combination; [`compare`] is a pure function of its two arguments.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{FULL_HOUSE_LEN, MIN_SEQUENCE_LEN, MIN_STRAIGHT_LEN};
use crate::domain::{Card, Rank, Special, Suit};
use crate::errors::domain::{DomainError, RuleKind};

/// Effective rank in half steps (rank × 2), so a Phoenix single can sit
/// half a rank above the card it beats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strength(u8);

impl Strength {
    pub const DOG: Strength = Strength(0);
    pub const MAHJONG: Strength = Strength(2);
    /// Phoenix led alone without an alternate name.
    pub const PHOENIX_LEAD: Strength = Strength(3);
    pub const DRAGON: Strength = Strength(30);

    pub const fn of_rank(rank: Rank) -> Strength {
        Strength(rank.value() * 2)
    }

    pub const fn half_steps(self) -> u8 {
        self.0
    }

    /// Strength as a (possibly fractional) rank, e.g. 7.5 for a Phoenix on a 7.
    pub fn as_rank_value(self) -> f32 {
        f32::from(self.0) / 2.0
    }

    const fn half_above(self) -> Strength {
        Strength(self.0 + 1)
    }

    const fn from_value(value: u8) -> Strength {
        Strength(value * 2)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombinationKind {
    Single,
    Pair,
    Triple,
    FullHouse,
    /// Consecutive pairs.
    Sequence,
    /// Consecutive singles.
    Straight,
    Bomb,
}

/// A classified play: kind, card count and resolved effective rank.
///
/// For straights, sequences and straight-flush bombs the rank is the top of
/// the run; for a full house it is the rank of the triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    kind: CombinationKind,
    length: usize,
    rank: Strength,
    dog: bool,
    phoenix_as: Option<Strength>,
}

impl Combination {
    pub fn kind(&self) -> CombinationKind {
        self.kind
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn rank(&self) -> Strength {
        self.rank
    }

    pub fn is_bomb(&self) -> bool {
        self.kind == CombinationKind::Bomb
    }

    pub fn is_dog(&self) -> bool {
        self.dog
    }

    pub fn is_dragon(&self) -> bool {
        self.kind == CombinationKind::Single && self.rank == Strength::DRAGON
    }

    /// Effective value the Phoenix took in this combination, if it was used.
    pub fn phoenix_as(&self) -> Option<Strength> {
        self.phoenix_as
    }

    fn single(rank: Strength) -> Combination {
        Combination {
            kind: CombinationKind::Single,
            length: 1,
            rank,
            dog: false,
            phoenix_as: None,
        }
    }
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::business(RuleKind::InvalidCombination, detail)
}

/// Classify a set of cards into a combination.
///
/// `table` is the combination currently on the table (used to value a
/// Phoenix single). `phoenix_alt` is the caller-chosen rank for the Phoenix:
/// honoured when leading it alone, and in multi-card sets when it completes
/// the shape.
pub fn classify(
    cards: &[Card],
    table: Option<&Combination>,
    phoenix_alt: Option<Rank>,
) -> Result<Combination, DomainError> {
    if cards.is_empty() {
        return Err(invalid("No cards selected"));
    }
    let unique: HashSet<&Card> = cards.iter().collect();
    if unique.len() != cards.len() {
        return Err(invalid("The same card was selected twice"));
    }

    if let [card] = cards {
        return classify_single(*card, table, phoenix_alt);
    }

    if cards.contains(&Card::DOG) {
        return Err(invalid("The Dog can only be played alone"));
    }
    if cards.contains(&Card::DRAGON) {
        return Err(invalid("The Dragon can only be played alone"));
    }

    if let Some(bomb) = natural_bomb(cards) {
        return Ok(bomb);
    }

    // Normal cards count by face value, the Mahjong as 1.
    let mut values: Vec<u8> = Vec::with_capacity(cards.len());
    let mut has_phoenix = false;
    for card in cards {
        match card {
            Card::Normal { rank, .. } => values.push(rank.value()),
            Card::Special(Special::Mahjong) => values.push(1),
            Card::Special(Special::Phoenix) => has_phoenix = true,
            Card::Special(_) => return Err(invalid("Invalid card in combination")),
        }
    }

    if !has_phoenix {
        let (kind, top) =
            shape(&values).ok_or_else(|| invalid("Cards do not form a valid combination"))?;
        return Ok(Combination {
            kind,
            length: cards.len(),
            rank: Strength::from_value(top),
            dog: false,
            phoenix_as: None,
        });
    }

    // Try every substitute for the Phoenix; keep the caller's choice when it
    // fits, otherwise the highest one that completes a shape.
    let mut best: Option<(Rank, CombinationKind, u8)> = None;
    for substitute in Rank::ALL {
        let mut with_sub = values.clone();
        with_sub.push(substitute.value());
        if let Some((kind, top)) = shape(&with_sub) {
            if phoenix_alt == Some(substitute) {
                best = Some((substitute, kind, top));
                break;
            }
            best = Some((substitute, kind, top));
        }
    }

    match (best, phoenix_alt) {
        (Some((substitute, _, _)), Some(alt)) if substitute != alt => Err(invalid(format!(
            "The Phoenix cannot stand for {alt} in this combination"
        ))),
        (Some((substitute, kind, top)), _) => Ok(Combination {
            kind,
            length: cards.len(),
            rank: Strength::from_value(top),
            dog: false,
            phoenix_as: Some(Strength::of_rank(substitute)),
        }),
        (None, _) => Err(invalid("Cards do not form a valid combination")),
    }
}

fn classify_single(
    card: Card,
    table: Option<&Combination>,
    phoenix_alt: Option<Rank>,
) -> Result<Combination, DomainError> {
    let combination = match card {
        Card::Normal { rank, .. } => Combination::single(Strength::of_rank(rank)),
        Card::Special(Special::Mahjong) => Combination::single(Strength::MAHJONG),
        Card::Special(Special::Dragon) => Combination::single(Strength::DRAGON),
        Card::Special(Special::Dog) => Combination {
            dog: true,
            ..Combination::single(Strength::DOG)
        },
        Card::Special(Special::Phoenix) => {
            let rank = match table {
                Some(top) if top.is_dragon() => {
                    return Err(DomainError::business(
                        RuleKind::DoesNotBeatTable,
                        "The Phoenix cannot beat the Dragon",
                    ));
                }
                Some(top) if top.kind == CombinationKind::Single => top.rank.half_above(),
                _ => phoenix_alt
                    .map(|alt| Strength::of_rank(alt).half_above())
                    .unwrap_or(Strength::PHOENIX_LEAD),
            };
            Combination {
                phoenix_as: Some(rank),
                ..Combination::single(rank)
            }
        }
    };
    Ok(combination)
}

/// Four of a kind or a single-suit straight of at least five normal cards.
fn natural_bomb(cards: &[Card]) -> Option<Combination> {
    let normals: Vec<(Suit, u8)> = cards
        .iter()
        .map(|c| match c {
            Card::Normal { suit, rank } => Some((*suit, rank.value())),
            Card::Special(_) => None,
        })
        .collect::<Option<Vec<_>>>()?;

    let first = normals.first()?;
    let bomb = |top: u8| Combination {
        kind: CombinationKind::Bomb,
        length: cards.len(),
        rank: Strength::from_value(top),
        dog: false,
        phoenix_as: None,
    };

    if normals.len() == 4 && normals.iter().all(|(_, v)| *v == first.1) {
        return Some(bomb(first.1));
    }

    if normals.len() >= MIN_STRAIGHT_LEN && normals.iter().all(|(s, _)| *s == first.0) {
        let mut values: Vec<u8> = normals.iter().map(|(_, v)| *v).collect();
        values.sort_unstable();
        if is_run(&values) {
            return values.last().map(|top| bomb(*top));
        }
    }
    None
}

fn is_run(sorted: &[u8]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Non-bomb shape of a multiset of values (Mahjong = 1). Returns the kind
/// and the ranking value.
fn shape(values: &[u8]) -> Option<(CombinationKind, u8)> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    let low = *sorted.first()?;
    let high = *sorted.last()?;

    if low == high && low >= 2 {
        return match n {
            2 => Some((CombinationKind::Pair, low)),
            3 => Some((CombinationKind::Triple, low)),
            _ => None,
        };
    }

    if n == FULL_HOUSE_LEN && low >= 2 {
        let low_count = sorted.iter().filter(|v| **v == low).count();
        let high_count = sorted.iter().filter(|v| **v == high).count();
        match (low_count, high_count) {
            (3, 2) => return Some((CombinationKind::FullHouse, low)),
            (2, 3) => return Some((CombinationKind::FullHouse, high)),
            _ => {}
        }
    }

    if n >= MIN_STRAIGHT_LEN && is_run(&sorted) {
        return Some((CombinationKind::Straight, high));
    }

    if n >= MIN_SEQUENCE_LEN && n % 2 == 0 && low >= 2 {
        let pairs_ok = sorted.chunks(2).all(|pair| pair[0] == pair[1]);
        let tops: Vec<u8> = sorted.chunks(2).map(|pair| pair[0]).collect();
        if pairs_ok && is_run(&tops) {
            return Some((CombinationKind::Sequence, high));
        }
    }

    None
}

/// Compare two combinations.
///
/// Bombs beat every non-bomb and compare among themselves by length, then
/// rank. Non-bombs are comparable only with the same kind and length. The
/// Dog is never comparable.
pub fn compare(a: &Combination, b: &Combination) -> Option<Ordering> {
    if a.dog || b.dog {
        return None;
    }
    match (a.is_bomb(), b.is_bomb()) {
        (true, true) => Some((a.length, a.rank).cmp(&(b.length, b.rank))),
        (true, false) => Some(Ordering::Greater),
        (false, true) => Some(Ordering::Less),
        (false, false) if a.kind == b.kind && a.length == b.length => Some(a.rank.cmp(&b.rank)),
        (false, false) => None,
    }
}

/// Whether `play` may be placed on top of `table`.
pub fn beats(play: &Combination, table: &Combination) -> bool {
    compare(play, table) == Some(Ordering::Greater)
}

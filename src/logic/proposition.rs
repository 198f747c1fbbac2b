//! Holders and the atomic propositions over them

use crate::cards::Card;
use serde::Serialize;
use std::fmt;

/// Anything that can own a card. Holders are mutually exclusive owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Holder {
    Player(usize),
    CaseFile,
    ExtraCards,
}

impl Holder {
    pub fn is_player(&self) -> bool {
        matches!(self, Holder::Player(_))
    }

    /// Players in seat order followed by the case file and the extra-card pool
    pub fn all(players: &[usize]) -> Vec<Holder> {
        players
            .iter()
            .map(|&p| Holder::Player(p))
            .chain([Holder::CaseFile, Holder::ExtraCards])
            .collect()
    }
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holder::Player(index) => write!(f, "player {}", index),
            Holder::CaseFile => f.write_str("case file"),
            Holder::ExtraCards => f.write_str("extra cards"),
        }
    }
}

/// `HolderHasCard(holder, card)`: the atomic boolean variable of the theory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Proposition {
    pub holder: Holder,
    pub card: Card,
}

impl Proposition {
    pub fn new(holder: Holder, card: Card) -> Self {
        Self { holder, card }
    }

    pub fn case_file(card: Card) -> Self {
        Self::new(Holder::CaseFile, card)
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has {} card", self.holder, self.card)
    }
}

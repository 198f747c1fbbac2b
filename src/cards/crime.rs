//! Crime triples: the hidden case file or a player's guess

use super::{Card, Category};
use anyhow::Result;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Crime {
    pub character: Card,
    pub weapon: Card,
    pub room: Card,
}

impl Crime {
    /// Assemble a crime from three cards given in any order, one per category
    pub fn from_cards(cards: &[Card]) -> Result<Self> {
        if cards.len() != 3 {
            anyhow::bail!("A crime needs exactly 3 cards, got {}", cards.len());
        }

        let pick = |category: Category| -> Result<Card> {
            let mut matching = cards.iter().filter(|c| c.category == category);
            match (matching.next(), matching.next()) {
                (Some(card), None) => Ok(*card),
                _ => anyhow::bail!("A crime needs exactly one {} card", category),
            }
        };

        Ok(Self {
            character: pick(Category::Character)?,
            weapon: pick(Category::Weapon)?,
            room: pick(Category::Room)?,
        })
    }

    pub fn cards(&self) -> [Card; 3] {
        [self.character, self.weapon, self.room]
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards().contains(card)
    }
}

impl fmt::Display for Crime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with the {} in the {}",
            self.character.title(),
            self.weapon.title(),
            self.room.title()
        )
    }
}

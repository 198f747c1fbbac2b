//! The fixed deck of rumor cards a game is played with

use super::{Card, Category};
use anyhow::Result;

pub const CHARACTER_NAMES: [&str; 6] = ["mustard", "plum", "green", "peacock", "scarlet", "white"];

pub const WEAPON_NAMES: [&str; 9] = [
    "knife",
    "candlestick",
    "pistol",
    "poison",
    "trophy",
    "rope",
    "bat",
    "ax",
    "dumbbell",
];

pub const ROOM_NAMES: [&str; 9] = [
    "hall",
    "dining room",
    "kitchen",
    "patio",
    "observatory",
    "theater",
    "living room",
    "spa",
    "guest house",
];

/// Number of cards sealed in the case file
pub const N_CASE_FILE_CARDS: usize = 3;

/// Ordered card lists per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    characters: Vec<Card>,
    weapons: Vec<Card>,
    rooms: Vec<Card>,
}

impl Catalog {
    /// Build a catalog from card names; every category needs at least one card
    pub fn new(characters: &[&'static str], weapons: &[&'static str], rooms: &[&'static str]) -> Result<Self> {
        if characters.is_empty() || weapons.is_empty() || rooms.is_empty() {
            anyhow::bail!("Every card category needs at least one card");
        }

        let catalog = Self {
            characters: characters.iter().map(|&n| Card::character(n)).collect(),
            weapons: weapons.iter().map(|&n| Card::weapon(n)).collect(),
            rooms: rooms.iter().map(|&n| Card::room(n)).collect(),
        };

        let mut seen = std::collections::HashSet::new();
        for card in catalog.cards() {
            if !seen.insert(card) {
                anyhow::bail!("Duplicate card in catalog: {}", card);
            }
        }

        Ok(catalog)
    }

    /// The board game's deck
    pub fn standard() -> Self {
        Self {
            characters: CHARACTER_NAMES.iter().map(|&n| Card::character(n)).collect(),
            weapons: WEAPON_NAMES.iter().map(|&n| Card::weapon(n)).collect(),
            rooms: ROOM_NAMES.iter().map(|&n| Card::room(n)).collect(),
        }
    }

    /// All cards: characters, then weapons, then rooms
    pub fn cards(&self) -> Vec<Card> {
        self.characters
            .iter()
            .chain(&self.weapons)
            .chain(&self.rooms)
            .copied()
            .collect()
    }

    pub fn category(&self, category: Category) -> &[Card] {
        match category {
            Category::Character => &self.characters,
            Category::Weapon => &self.weapons,
            Category::Room => &self.rooms,
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len() + self.weapons.len() + self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the card in `cards()` order
    pub fn position(&self, card: &Card) -> Option<usize> {
        let offset = match card.category {
            Category::Character => 0,
            Category::Weapon => self.characters.len(),
            Category::Room => self.characters.len() + self.weapons.len(),
        };
        self.category(card.category)
            .iter()
            .position(|c| c == card)
            .map(|i| offset + i)
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.position(card).is_some()
    }

    /// Case-insensitive lookup by card name
    pub fn find(&self, name: &str) -> Option<Card> {
        let wanted = name.trim().to_lowercase();
        self.cards().into_iter().find(|c| c.name == wanted)
    }

    /// Cards left undealt once the case file is filled and the rest split evenly
    pub fn n_extra_cards(&self, n_players: usize) -> usize {
        if n_players == 0 {
            return 0;
        }
        self.len().saturating_sub(N_CASE_FILE_CARDS) % n_players
    }

    pub fn n_cards_per_player(&self, n_players: usize) -> usize {
        if n_players == 0 {
            return 0;
        }
        self.len().saturating_sub(N_CASE_FILE_CARDS) / n_players
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

//! Rumor cards and their categories

use serde::Serialize;
use std::fmt;

/// The three kinds of rumor card; the case file holds exactly one of each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Character,
    Weapon,
    Room,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Character, Category::Weapon, Category::Room];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Character => "Character",
            Category::Weapon => "Weapon",
            Category::Room => "Room",
        };
        f.write_str(label)
    }
}

/// A single rumor card, identified by category and name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Card {
    pub category: Category,
    pub name: &'static str,
}

impl Card {
    pub const fn new(category: Category, name: &'static str) -> Self {
        Self { category, name }
    }

    pub const fn character(name: &'static str) -> Self {
        Self::new(Category::Character, name)
    }

    pub const fn weapon(name: &'static str) -> Self {
        Self::new(Category::Weapon, name)
    }

    pub const fn room(name: &'static str) -> Self {
        Self::new(Category::Room, name)
    }

    /// Name with each word capitalized, e.g. "Dining Room"
    pub fn title(&self) -> String {
        self.name
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.title())
    }
}

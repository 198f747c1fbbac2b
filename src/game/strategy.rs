//! How bots pick guesses and answer them

use crate::agent::Agent;
use crate::cards::{Card, Category, Crime};
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessStrategy {
    /// Any card of each category
    Random,
    /// The first case-file card of each category the agent cannot yet rule in or out
    FirstFreeCaseFile,
    /// A random case-file card of each category the agent cannot yet rule in or out
    #[default]
    RandomFreeCaseFile,
}

impl GuessStrategy {
    pub fn make_guess<R: Rng + ?Sized>(&self, agent: &mut Agent, rng: &mut R) -> Result<Crime> {
        let free: Vec<Card> = match self {
            GuessStrategy::Random => Vec::new(),
            GuessStrategy::FirstFreeCaseFile | GuessStrategy::RandomFreeCaseFile => agent
                .free_case_file_propositions(None)?
                .into_iter()
                .map(|prop| prop.card)
                .collect(),
        };

        let mut picks = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let free_in_category: Vec<Card> = free.iter().copied().filter(|c| c.category == category).collect();
            let candidates = if free_in_category.is_empty() {
                agent.catalog().category(category).to_vec()
            } else {
                free_in_category
            };

            let pick = match self {
                GuessStrategy::FirstFreeCaseFile => candidates.first(),
                GuessStrategy::Random | GuessStrategy::RandomFreeCaseFile => candidates.choose(rng),
            };
            picks.push(*pick.with_context(|| format!("No {} card to guess", category))?);
        }

        Crime::from_cards(&picks)
    }
}

/// A random card from `hand` that appears in the guess, or `None` to pass
pub fn answer_guess<R: Rng + ?Sized>(hand: &[Card], guess: &Crime, rng: &mut R) -> Option<Card> {
    let matching: Vec<Card> = hand.iter().copied().filter(|c| guess.contains(c)).collect();
    matching.choose(rng).copied()
}

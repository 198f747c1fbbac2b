//! Dealing a fresh game

use crate::agent::Agent;
use crate::cards::{Card, Catalog, Category, Crime};
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Hidden crime, undealt cards, and one agent per player and observer.
///
/// Players occupy agent indices `0..n_players` in seat order; observers follow.
#[derive(Debug, Clone)]
pub struct GameSetup {
    pub crime: Crime,
    pub extra_cards: Vec<Card>,
    pub agents: Vec<Agent>,
    pub n_players: usize,
}

impl GameSetup {
    pub fn deal<R: Rng + ?Sized>(catalog: &Catalog, n_players: usize, n_observers: usize, rng: &mut R) -> Result<Self> {
        if n_players < 2 {
            anyhow::bail!("A game needs at least two players, got {}", n_players);
        }
        let n_cards_per_player = catalog.n_cards_per_player(n_players);
        if n_cards_per_player == 0 {
            anyhow::bail!("{} cards cannot be dealt to {} players", catalog.len(), n_players);
        }

        let mut crime_cards = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let card = catalog
                .category(category)
                .choose(rng)
                .with_context(|| format!("No {} cards to draw the crime from", category))?;
            crime_cards.push(*card);
        }
        let crime = Crime::from_cards(&crime_cards)?;

        let mut deck: Vec<Card> = catalog.cards().into_iter().filter(|c| !crime.contains(c)).collect();
        deck.shuffle(rng);

        let extra_cards = deck.split_off(deck.len() - catalog.n_extra_cards(n_players));
        let players: Vec<usize> = (0..n_players).collect();

        let mut agents: Vec<Agent> = deck
            .chunks(n_cards_per_player)
            .zip(&players)
            .map(|(hand, &seat)| Agent::player(seat, players.clone(), catalog.clone(), hand.to_vec()))
            .collect();
        agents.extend(
            (n_players..n_players + n_observers).map(|index| Agent::observer(index, players.clone(), catalog.clone())),
        );

        Ok(Self {
            crime,
            extra_cards,
            agents,
            n_players,
        })
    }

    /// Seats of the players
    pub fn players(&self) -> Vec<usize> {
        (0..self.n_players).collect()
    }
}

//! Translates game rules and an agent's log into a set of equations

use super::log::{GameLog, Reveal};
use crate::cards::{Card, Catalog, Category};
use crate::error::{DeductionError, Result};
use crate::logic::{Equation, Event, Holder};
use itertools::Itertools;

/// Builds the equations describing everything an agent knows.
///
/// Equations are kept in the order they are derived (static rules, then the log
/// turn by turn, then self-knowledge) with later duplicates dropped, so the same
/// knowledge always compiles to the same clause order.
pub struct KnowledgeBuilder<'a> {
    catalog: &'a Catalog,
    players: &'a [usize],
}

impl<'a> KnowledgeBuilder<'a> {
    pub fn new(catalog: &'a Catalog, players: &'a [usize]) -> Self {
        Self { catalog, players }
    }

    /// Full, de-duplicated knowledge base. `hand` is the agent's own seat and
    /// cards when the agent is a player.
    pub fn build(&self, log: &GameLog, hand: Option<(usize, &[Card])>) -> Result<Vec<Equation>> {
        let mut equations = self.static_rules();
        equations.extend(self.log_rules(log)?);
        if let Some((seat, cards)) = hand {
            equations.extend(self.self_knowledge(seat, cards));
        }
        Ok(equations.into_iter().unique().collect())
    }

    /// Rules that hold in every game
    pub fn static_rules(&self) -> Vec<Equation> {
        let mut equations = Vec::new();

        // One card of each category in the case file
        for category in Category::ALL {
            equations.push(Equation::holds(Event::symmetric_difference(
                self.catalog
                    .category(category)
                    .iter()
                    .map(|&card| Event::atomic(Holder::CaseFile, card)),
            )));
        }

        // Every card has exactly one holder
        let holders = Holder::all(self.players);
        for card in self.catalog.cards() {
            equations.push(Equation::holds(Event::symmetric_difference(
                holders.iter().map(|&holder| Event::atomic(holder, card)),
            )));
        }

        equations
    }

    /// Facts learned from reveals, in log order
    pub fn log_rules(&self, log: &GameLog) -> Result<Vec<Equation>> {
        let mut equations = Vec::new();

        for entry in log.entries() {
            for card_reveal in &entry.reveals {
                let responder = card_reveal.responder;
                match card_reveal.reveal {
                    Reveal::Card(card) => {
                        equations.push(Equation::holds(Event::atomic(responder, card)));
                    }
                    Reveal::Unknown => {
                        let guess = entry.guess.ok_or(DeductionError::MissingGuess(entry.turn_index))?;
                        // The responder holds at least one of the guessed cards
                        equations.push(Equation::holds(Event::union(
                            guess.cards().into_iter().map(|card| Event::atomic(responder, card)),
                        )));
                    }
                    Reveal::Pass => {
                        let guess = entry.guess.ok_or(DeductionError::MissingGuess(entry.turn_index))?;
                        for card in guess.cards() {
                            equations.push(Equation::fails(Event::atomic(responder, card)));
                        }
                    }
                }
            }
        }

        Ok(equations)
    }

    /// A player knows its own hand exactly
    pub fn self_knowledge(&self, seat: usize, hand: &[Card]) -> Vec<Equation> {
        self.catalog
            .cards()
            .into_iter()
            .map(|card| Equation::new(Event::atomic(Holder::Player(seat), card), hand.contains(&card)))
            .collect()
    }
}

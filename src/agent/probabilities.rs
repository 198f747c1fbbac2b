//! Approximate holder/card probabilities

use crate::cards::Card;
use crate::logic::{Holder, Proposition};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityEntry {
    pub holder: Holder,
    pub card: Card,
    pub approx_probability: f64,
}

/// One approximate probability per (holder, card) pair, in proposition id order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProbabilityTable {
    entries: Vec<ProbabilityEntry>,
}

impl ProbabilityTable {
    pub fn from_marginals(propositions: &[Proposition], marginals: &[f64]) -> Self {
        let entries = propositions
            .iter()
            .zip(marginals)
            .map(|(prop, &p)| ProbabilityEntry {
                holder: prop.holder,
                card: prop.card,
                approx_probability: p,
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, holder: Holder, card: Card) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.holder == holder && e.card == card)
            .map(|e| e.approx_probability)
    }

    pub fn entries(&self) -> &[ProbabilityEntry] {
        &self.entries
    }

    /// Holders in first-appearance order
    pub fn holders(&self) -> Vec<Holder> {
        let mut holders: Vec<Holder> = Vec::new();
        for entry in &self.entries {
            if !holders.contains(&entry.holder) {
                holders.push(entry.holder);
            }
        }
        holders
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Stable variable numbering for holder/card propositions

use crate::cards::{Card, Catalog};
use crate::error::{DeductionError, Result};
use crate::logic::{Holder, Proposition};

/// Maps every proposition of the fixed universe (holders x cards) to a SAT variable.
///
/// Ids are positional: holders in seat order (players, case file, extra cards), and
/// within a holder, cards in catalog order. Two indexes built from the same players and
/// catalog always agree, so results keyed by id stay valid between inference calls.
#[derive(Debug, Clone)]
pub struct PropositionIndex {
    holders: Vec<Holder>,
    cards: Vec<Card>,
    catalog: Catalog,
}

impl PropositionIndex {
    pub fn new(players: &[usize], catalog: &Catalog) -> Self {
        Self {
            holders: Holder::all(players),
            cards: catalog.cards(),
            catalog: catalog.clone(),
        }
    }

    /// SAT variable id for a proposition, starting at 1
    pub fn id_of(&self, prop: &Proposition) -> Result<i32> {
        let holder_pos = self
            .holders
            .iter()
            .position(|h| *h == prop.holder)
            .ok_or_else(|| DeductionError::UnknownProposition(prop.to_string()))?;
        let card_pos = self
            .catalog
            .position(&prop.card)
            .ok_or_else(|| DeductionError::UnknownProposition(prop.to_string()))?;

        Ok((holder_pos * self.cards.len() + card_pos + 1) as i32)
    }

    /// Inverse of `id_of`; `None` for auxiliary or out-of-range ids
    pub fn proposition_of(&self, id: i32) -> Option<Proposition> {
        if id < 1 || id as usize > self.variable_count() {
            return None;
        }
        let index = id as usize - 1;
        let holder = self.holders[index / self.cards.len()];
        let card = self.cards[index % self.cards.len()];
        Some(Proposition::new(holder, card))
    }

    /// All propositions in id order
    pub fn propositions(&self) -> Vec<Proposition> {
        self.holders
            .iter()
            .flat_map(|&h| self.cards.iter().map(move |&c| Proposition::new(h, c)))
            .collect()
    }

    /// Variable ids of every card proposition for one holder, in catalog order
    pub fn holder_variables(&self, holder: Holder) -> Result<Vec<i32>> {
        self.cards
            .iter()
            .map(|&card| self.id_of(&Proposition::new(holder, card)))
            .collect()
    }

    pub fn case_file_propositions(&self) -> Vec<Proposition> {
        self.cards.iter().map(|&c| Proposition::case_file(c)).collect()
    }

    /// Size of the base universe; auxiliary ids start above this
    pub fn variable_count(&self) -> usize {
        self.holders.len() * self.cards.len()
    }

    pub fn holders(&self) -> &[Holder] {
        &self.holders
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Players among the holders, in seat order
    pub fn players(&self) -> Vec<usize> {
        self.holders
            .iter()
            .filter_map(|h| match h {
                Holder::Player(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_unique() {
        let catalog = Catalog::standard();
        let index = PropositionIndex::new(&[0, 1, 2], &catalog);
        assert_eq!(index.variable_count(), 5 * 24);

        let mut ids: Vec<i32> = index
            .propositions()
            .iter()
            .map(|p| index.id_of(p).unwrap())
            .collect();
        let expected: Vec<i32> = (1..=120).collect();
        assert_eq!(ids, expected);
        ids.dedup();
        assert_eq!(ids.len(), 120);
    }

    #[test]
    fn test_round_trip_and_stability() {
        let catalog = Catalog::standard();
        let a = PropositionIndex::new(&[0, 1], &catalog);
        let b = PropositionIndex::new(&[0, 1], &catalog);

        for prop in a.propositions() {
            let id = a.id_of(&prop).unwrap();
            assert_eq!(b.id_of(&prop).unwrap(), id);
            assert_eq!(a.proposition_of(id), Some(prop));
        }
        assert_eq!(a.proposition_of(0), None);
        assert_eq!(a.proposition_of(a.variable_count() as i32 + 1), None);
    }

    #[test]
    fn test_unknown_propositions() {
        let catalog = Catalog::standard();
        let index = PropositionIndex::new(&[0, 1], &catalog);
        let outsider = Proposition::new(Holder::Player(5), Card::weapon("rope"));
        assert!(index.id_of(&outsider).is_err());
        let bad_card = Proposition::new(Holder::Player(0), Card::weapon("trebuchet"));
        assert!(index.id_of(&bad_card).is_err());
    }

    #[test]
    fn test_case_file_ids_follow_players() {
        let catalog = Catalog::standard();
        let index = PropositionIndex::new(&[0, 1], &catalog);
        let first = index.case_file_propositions()[0];
        assert_eq!(index.id_of(&first).unwrap(), 2 * 24 + 1);
        assert_eq!(index.holder_variables(Holder::ExtraCards).unwrap()[0], 3 * 24 + 1);
    }
}

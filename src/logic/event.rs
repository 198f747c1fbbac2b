//! Probability-bearing events over propositions and the equations that fix them
//!
//! Every event can be evaluated against per-proposition probabilities and compiled
//! into CNF clauses. Composite events keep their members sorted and free of
//! duplicates, so structurally identical events compare and hash equal no matter
//! the order they were built in.

use super::{Holder, Proposition};
use crate::cards::Card;
use crate::error::{DeductionError, Result};
use crate::sat::Clause;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Event {
    Atomic(Proposition),
    /// Independent AND of the members
    Intersection(Vec<Event>),
    /// Exactly one of the mutually exclusive members
    SymmetricDifference(Vec<Event>),
    /// At least one of the members
    Union(Vec<Event>),
}

impl Event {
    pub fn atomic(holder: Holder, card: Card) -> Self {
        Event::Atomic(Proposition::new(holder, card))
    }

    pub fn intersection<I: IntoIterator<Item = Event>>(events: I) -> Self {
        Event::Intersection(canonical(events))
    }

    pub fn symmetric_difference<I: IntoIterator<Item = Event>>(events: I) -> Self {
        Event::SymmetricDifference(canonical(events))
    }

    pub fn union<I: IntoIterator<Item = Event>>(events: I) -> Self {
        Event::Union(canonical(events))
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Event::Atomic(_))
    }

    fn members(&self) -> &[Event] {
        match self {
            Event::Atomic(_) => &[],
            Event::Intersection(events)
            | Event::SymmetricDifference(events)
            | Event::Union(events) => events,
        }
    }

    /// Constituent propositions, flattened in member order
    pub fn propositions(&self) -> Vec<Proposition> {
        match self {
            Event::Atomic(prop) => vec![*prop],
            _ => self.members().iter().flat_map(Event::propositions).collect(),
        }
    }

    /// Probability of the event given a probability for every proposition
    pub fn evaluate<F>(&self, values: &F) -> f64
    where
        F: Fn(&Proposition) -> f64,
    {
        match self {
            Event::Atomic(prop) => values(prop),
            Event::Intersection(events) => events.iter().map(|e| e.evaluate(values)).product(),
            Event::SymmetricDifference(events) => events.iter().map(|e| e.evaluate(values)).sum(),
            Event::Union(events) => {
                1.0 - events
                    .iter()
                    .map(|e| 1.0 - e.evaluate(values))
                    .product::<f64>()
            }
        }
    }

    /// Compile the event into clauses asserting it true, or false when `invert` is set.
    ///
    /// Only atomic events can be negated, and composite members must be atomic.
    pub fn compile_cnf<F>(&self, id_of: &F, invert: bool) -> Result<Vec<Clause>>
    where
        F: Fn(&Proposition) -> Result<i32>,
    {
        if let Event::Atomic(prop) = self {
            let id = id_of(prop)?;
            return Ok(vec![Clause::unit(if invert { -id } else { id })]);
        }

        if invert {
            return Err(DeductionError::IllegalNegation(self.to_string()));
        }

        let ids = self
            .members()
            .iter()
            .map(|member| match member {
                Event::Atomic(prop) => id_of(prop),
                nested => Err(DeductionError::NestedComposite(nested.to_string())),
            })
            .collect::<Result<Vec<i32>>>()?;

        let clauses = match self {
            Event::Intersection(_) => ids.iter().map(|&id| Clause::unit(id)).collect(),
            Event::SymmetricDifference(_) => std::iter::once(Clause::new(ids.clone()))
                .chain(
                    ids.iter()
                        .tuple_combinations()
                        .map(|(&a, &b)| Clause::binary(-a, -b)),
                )
                .collect(),
            Event::Union(_) => vec![Clause::new(ids)],
            Event::Atomic(_) => unreachable!("atomic events return early"),
        };

        Ok(clauses)
    }

    /// The arithmetic used by `evaluate`, written out
    pub fn formula(&self) -> String {
        match self {
            Event::Atomic(prop) => format!("P({})", prop),
            Event::Intersection(events) => join_formulas(events, " * ", |f| format!("({})", f)),
            Event::SymmetricDifference(events) => join_formulas(events, " + ", |f| format!("({})", f)),
            Event::Union(events) => format!(
                "1 - {}",
                join_formulas(events, " * ", |f| format!("(1 - ({}))", f))
            ),
        }
    }
}

fn canonical<I: IntoIterator<Item = Event>>(events: I) -> Vec<Event> {
    events.into_iter().sorted().dedup().collect()
}

fn join_formulas(events: &[Event], sep: &str, wrap: impl Fn(String) -> String) -> String {
    events.iter().map(|e| wrap(e.formula())).join(sep)
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self {
            Event::Atomic(prop) => return write!(f, "{}", prop),
            Event::Intersection(_) => " n ",
            Event::SymmetricDifference(_) => " ^ ",
            Event::Union(_) => " u ",
        };
        let rendered = self.members().iter().map(|e| format!("({})", e)).join(sep);
        f.write_str(&rendered)
    }
}

/// `lhs == rhs`: the event is forced true (`rhs`) or false (`!rhs`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Equation {
    pub lhs: Event,
    pub rhs: bool,
}

impl Equation {
    pub fn new(lhs: Event, rhs: bool) -> Self {
        Self { lhs, rhs }
    }

    pub fn holds(lhs: Event) -> Self {
        Self::new(lhs, true)
    }

    pub fn fails(lhs: Event) -> Self {
        Self::new(lhs, false)
    }

    pub fn propositions(&self) -> Vec<Proposition> {
        self.lhs.propositions()
    }

    pub fn compile_cnf<F>(&self, id_of: &F) -> Result<Vec<Clause>>
    where
        F: Fn(&Proposition) -> Result<i32>,
    {
        self.lhs.compile_cnf(id_of, !self.rhs)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P({}) = {}", self.lhs, u8::from(self.rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn props() -> Vec<Proposition> {
        vec![
            Proposition::new(Holder::Player(0), Card::weapon("rope")),
            Proposition::new(Holder::Player(1), Card::weapon("rope")),
            Proposition::new(Holder::CaseFile, Card::weapon("rope")),
        ]
    }

    fn ids() -> HashMap<Proposition, i32> {
        props().into_iter().zip(1..).collect()
    }

    fn lookup(table: &HashMap<Proposition, i32>) -> impl Fn(&Proposition) -> Result<i32> + '_ {
        move |p| {
            table
                .get(p)
                .copied()
                .ok_or_else(|| DeductionError::UnknownProposition(p.to_string()))
        }
    }

    fn atoms() -> Vec<Event> {
        props().into_iter().map(Event::Atomic).collect()
    }

    #[test]
    fn test_atomic_compiles_to_unit_clause() {
        let table = ids();
        let event = atoms()[1].clone();
        assert_eq!(event.compile_cnf(&lookup(&table), false).unwrap(), vec![Clause::unit(2)]);
        assert_eq!(event.compile_cnf(&lookup(&table), true).unwrap(), vec![Clause::unit(-2)]);
    }

    #[test]
    fn test_intersection_forces_every_member() {
        let table = ids();
        let event = Event::intersection(atoms());
        let clauses = event.compile_cnf(&lookup(&table), false).unwrap();
        assert_eq!(clauses, vec![Clause::unit(1), Clause::unit(2), Clause::unit(3)]);
    }

    #[test]
    fn test_symmetric_difference_encodes_exactly_one() {
        let table = ids();
        let event = Event::symmetric_difference(atoms());
        let clauses = event.compile_cnf(&lookup(&table), false).unwrap();
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[0], Clause::new(vec![1, 2, 3]));
        assert!(clauses.contains(&Clause::binary(-1, -2)));
        assert!(clauses.contains(&Clause::binary(-1, -3)));
        assert!(clauses.contains(&Clause::binary(-2, -3)));
    }

    #[test]
    fn test_union_is_single_clause() {
        let table = ids();
        let event = Event::union(atoms());
        let clauses = event.compile_cnf(&lookup(&table), false).unwrap();
        assert_eq!(clauses, vec![Clause::new(vec![1, 2, 3])]);
    }

    #[test]
    fn test_negated_composite_is_rejected() {
        let table = ids();
        let event = Event::union(atoms());
        let err = event.compile_cnf(&lookup(&table), true).unwrap_err();
        assert!(matches!(err, DeductionError::IllegalNegation(_)));

        let equation = Equation::fails(Event::symmetric_difference(atoms()));
        assert!(equation.compile_cnf(&lookup(&table)).is_err());
    }

    #[test]
    fn test_nested_composite_is_rejected() {
        let table = ids();
        let nested = Event::union(vec![atoms()[0].clone(), Event::intersection(atoms())]);
        let err = nested.compile_cnf(&lookup(&table), false).unwrap_err();
        assert!(matches!(err, DeductionError::NestedComposite(_)));
    }

    #[test]
    fn test_evaluate_rules() {
        let values: HashMap<Proposition, f64> = props().into_iter().zip([0.5, 0.25, 0.2]).collect();
        let value_of = |p: &Proposition| values[p];

        let intersection = Event::intersection(atoms());
        assert!((intersection.evaluate(&value_of) - 0.025).abs() < 1e-12);

        let sym = Event::symmetric_difference(atoms());
        assert!((sym.evaluate(&value_of) - 0.95).abs() < 1e-12);

        let union = Event::union(atoms());
        let expected = 1.0 - 0.5 * 0.75 * 0.8;
        assert!((union.evaluate(&value_of) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_construction_order_does_not_matter() {
        let mut reversed = atoms();
        reversed.reverse();

        let a = Equation::holds(Event::union(atoms()));
        let b = Equation::holds(Event::union(reversed));
        assert_eq!(a, b);

        let set: HashSet<Equation> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);

        // Different variants with the same members stay distinct
        assert_ne!(Event::union(atoms()), Event::symmetric_difference(atoms()));
    }

    #[test]
    fn test_propositions_are_flattened() {
        let event = Event::union(atoms());
        let mut expected = props();
        expected.sort();
        assert_eq!(event.propositions(), expected);
    }

    #[test]
    fn test_display_and_formula() {
        let a = Event::atomic(Holder::Player(0), Card::weapon("rope"));
        let b = Event::atomic(Holder::Player(1), Card::weapon("rope"));
        let union = Event::union(vec![a, b]);

        assert_eq!(
            union.to_string(),
            "(player 0 has Weapon: Rope card) u (player 1 has Weapon: Rope card)"
        );
        assert!(union.formula().starts_with("1 - (1 - (P(player 0"));
        assert!(Equation::holds(union).to_string().ends_with(" = 1"));
    }
}

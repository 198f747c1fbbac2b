//! Deciding whether the case file is determined by a compiled knowledge base

use super::encoder::CnfInstance;
use super::solver::{SatSolver, SolverSolution};
use super::variables::PropositionIndex;
use crate::cards::{Category, Crime};
use crate::error::{DeductionError, Result};
use crate::logic::Proposition;
use tracing::debug;

/// What one deduction pass learned
#[derive(Debug, Clone)]
pub struct Deduction {
    /// The first model the solver returned
    pub model: SolverSolution,
    /// Case-file propositions whose value the knowledge does not force
    pub free: Vec<Proposition>,
    /// The crime, present only when nothing is free
    pub crime: Option<Crime>,
}

impl Deduction {
    pub fn is_solved(&self) -> bool {
        self.crime.is_some()
    }
}

/// Runs the solve-then-probe procedure over one CNF instance
pub struct DeductionSolver<'a> {
    index: &'a PropositionIndex,
}

impl<'a> DeductionSolver<'a> {
    pub fn new(index: &'a PropositionIndex) -> Self {
        Self { index }
    }

    /// Solve once, then re-solve each case-file proposition under the opposite
    /// assumption: if that is still satisfiable the proposition is free.
    pub fn deduce(&self, instance: &CnfInstance) -> Result<Deduction> {
        let mut solver = SatSolver::new();
        solver.add_clauses(&instance.clauses)?;

        let model = solver.solve()?.ok_or(DeductionError::Unsolvable)?;

        let mut free = Vec::new();
        for prop in self.index.case_file_propositions() {
            let id = self.index.id_of(&prop)?;
            let flipped = if model.value(id) { -id } else { id };
            if solver.solve_with_assumptions(&[flipped])?.is_some() {
                free.push(prop);
            }
        }

        debug!(
            free = free.len(),
            clauses = solver.clause_count(),
            "probed case-file propositions"
        );

        let crime = if free.is_empty() {
            Some(self.read_crime(&model)?)
        } else {
            None
        };

        Ok(Deduction { model, free, crime })
    }

    /// The true case-file card per category in a model
    fn read_crime(&self, model: &SolverSolution) -> Result<Crime> {
        let mut picked = Vec::with_capacity(3);
        for category in Category::ALL {
            let mut held = Vec::new();
            for &card in self.index.catalog().category(category) {
                if model.value(self.index.id_of(&Proposition::case_file(card))?) {
                    held.push(card);
                }
            }
            if held.len() != 1 {
                return Err(DeductionError::AmbiguousModel {
                    category: category.to_string(),
                    count: held.len(),
                });
            }
            picked.push(held[0]);
        }

        Ok(Crime {
            character: picked[0],
            weapon: picked[1],
            room: picked[2],
        })
    }
}

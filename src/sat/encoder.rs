//! CNF compilation of a knowledge base

use super::constraints::{CardinalityEncoder, Clause, IdAllocator};
use super::variables::PropositionIndex;
use crate::error::Result;
use crate::logic::{Equation, Holder, Proposition};
use itertools::Itertools;
use tracing::debug;

/// A compiled CNF instance over a proposition universe plus auxiliary variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnfInstance {
    pub clauses: Vec<Clause>,
    /// Highest variable id in use, auxiliaries included
    pub n_literals: i32,
    /// Ids `1..=n_propositions` are holder/card propositions
    pub n_propositions: usize,
}

impl CnfInstance {
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}

/// Compiles equations and per-player hand sizes into a single CNF instance
pub struct CnfCompiler<'a> {
    index: &'a PropositionIndex,
    n_cards_per_player: usize,
}

impl<'a> CnfCompiler<'a> {
    pub fn new(index: &'a PropositionIndex, n_cards_per_player: usize) -> Self {
        Self {
            index,
            n_cards_per_player,
        }
    }

    /// Compile every equation, drop repeated clauses (first occurrence wins), then
    /// require each player to hold exactly `n_cards_per_player` cards
    pub fn compile(&self, equations: &[Equation]) -> Result<CnfInstance> {
        let id_of = |prop: &Proposition| self.index.id_of(prop);

        let mut clauses = Vec::new();
        for equation in equations {
            clauses.extend(equation.compile_cnf(&id_of)?);
        }
        let mut clauses: Vec<Clause> = clauses.into_iter().unique().collect();

        let mut ids = IdAllocator::above(self.index.variable_count() as i32);
        for player in self.index.players() {
            let literals = self.index.holder_variables(Holder::Player(player))?;
            clauses.extend(CardinalityEncoder::exactly(
                &literals,
                self.n_cards_per_player,
                &mut ids,
            )?);
        }

        debug!(
            equations = equations.len(),
            clauses = clauses.len(),
            literals = ids.top(),
            "compiled knowledge base to CNF"
        );

        Ok(CnfInstance {
            clauses,
            n_literals: ids.top(),
            n_propositions: self.index.variable_count(),
        })
    }
}

//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use crate::error::{DeductionError, Result};
use cadical::Solver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
}

/// Result of SAT solving
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub assignment: HashMap<i32, bool>,
    pub solve_time: Duration,
}

impl SolverSolution {
    /// Truth value of a variable; unassigned variables read as false
    pub fn value(&self, var: i32) -> bool {
        self.assignment.get(&var).copied().unwrap_or(false)
    }

    /// Signed literals of the model, sorted by variable
    pub fn literals(&self) -> Vec<i32> {
        let mut vars: Vec<i32> = self.assignment.keys().copied().collect();
        vars.sort_unstable();
        vars.into_iter()
            .map(|v| if self.assignment[&v] { v } else { -v })
            .collect()
    }
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
        }
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            return Err(DeductionError::EmptyClause);
        }

        self.variable_count = self.variable_count.max(clause.max_variable() as usize);
        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    /// Solve the loaded clauses and return a model if one exists
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        self.solve_with_assumptions(&[])
    }

    /// Solve under temporary unit assumptions; the loaded clauses are kept for later calls
    pub fn solve_with_assumptions(&mut self, assumptions: &[i32]) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();
        let result = self.solver.solve_with(assumptions.iter().copied());
        let solve_time = start_time.elapsed();

        if result == Some(true) {
            let assignment = self.extract_assignment(self.variable_count as i32);
            Ok(Some(SolverSolution {
                assignment,
                solve_time,
            }))
        } else {
            Ok(None)
        }
    }

    /// Enumerate up to `max_solutions` models that differ on variables `1..=projection`
    pub fn solve_multiple_projected(
        &mut self,
        max_solutions: usize,
        projection: i32,
    ) -> Result<Vec<SolverSolution>> {
        let mut solutions = Vec::new();

        for _ in 0..max_solutions {
            match self.solve()? {
                Some(solution) => {
                    let blocking: Vec<i32> = (1..=projection)
                        .map(|var| if solution.value(var) { -var } else { var })
                        .collect();
                    solutions.push(solution);
                    if blocking.is_empty() {
                        break;
                    }
                    // Add blocking clause to prevent finding the same solution again
                    self.add_clause(&Clause::new(blocking))?;
                }
                None => break,
            }
        }

        Ok(solutions)
    }

    /// Extract variable assignment from the solver
    fn extract_assignment(&self, up_to: i32) -> HashMap<i32, bool> {
        let mut assignment = HashMap::new();

        for var in 1..=up_to {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        assignment
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_creation() {
        let solver = SatSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
    }

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = SatSolver::new();

        // x1 ∨ x2, ¬x1 ∨ x2
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();
        solver.add_clause(&Clause::new(vec![-1, 2])).unwrap();

        let solution = solver.solve().unwrap();
        assert!(solution.is_some());

        // x2 should be true to satisfy both clauses
        assert!(solution.unwrap().value(2));
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = SatSolver::new();

        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::unit(-1)).unwrap();

        assert!(solver.solve().unwrap().is_none());
    }

    #[test]
    fn test_assumptions_are_temporary() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();
        solver.add_clause(&Clause::binary(-1, -2)).unwrap();

        let forced = solver.solve_with_assumptions(&[-1]).unwrap().unwrap();
        assert!(forced.value(2));
        assert!(!forced.value(1));

        assert!(solver.solve_with_assumptions(&[1, 2]).unwrap().is_none());

        // The failed assumption does not stick
        let again = solver.solve_with_assumptions(&[1]).unwrap().unwrap();
        assert!(again.value(1));
        assert!(!again.value(2));
    }

    #[test]
    fn test_projected_enumeration() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();

        let solutions = solver.solve_multiple_projected(10, 2).unwrap();
        assert_eq!(solutions.len(), 3);
        for solution in &solutions {
            assert!(solution.value(1) || solution.value(2));
        }
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = SatSolver::new();
        assert_eq!(
            solver.add_clause(&Clause::new(vec![])),
            Err(DeductionError::EmptyClause)
        );
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = SatSolver::new();

        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);

        solver.add_clause(&Clause::new(vec![2, -7])).unwrap();
        assert_eq!(solver.variable_count(), 7);
    }

    #[test]
    fn test_model_literals_are_sorted() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::unit(-3)).unwrap();
        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::new(vec![2, 3])).unwrap();

        let solution = solver.solve().unwrap().unwrap();
        assert_eq!(solution.literals(), vec![1, 2, -3]);
    }
}

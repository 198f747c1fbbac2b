//! Clauses and the cardinality constraints over them

use crate::error::{DeductionError, Result};

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Highest variable id mentioned by the clause
    pub fn max_variable(&self) -> i32 {
        self.literals.iter().map(|l| l.abs()).max().unwrap_or(0)
    }
}

/// Hands out fresh variable ids above an occupied range
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_id: i32,
}

impl IdAllocator {
    /// Allocator whose first fresh id is `occupied + 1`
    pub fn above(occupied: i32) -> Self {
        Self { next_id: occupied + 1 }
    }

    pub fn fresh(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Highest id handed out so far (or the occupied bound if none)
    pub fn top(&self) -> i32 {
        self.next_id - 1
    }
}

/// Sequential-counter encoding of cardinality constraints
pub struct CardinalityEncoder;

impl CardinalityEncoder {
    /// Clauses forcing exactly `k` of `literals` true
    pub fn exactly(literals: &[i32], k: usize, ids: &mut IdAllocator) -> Result<Vec<Clause>> {
        let mut clauses = Self::at_most(literals, k, ids);
        clauses.extend(Self::at_least(literals, k, ids)?);
        Ok(clauses)
    }

    /// Clauses forcing at least `k` of `literals` true, as at-most `n - k` of their negations
    pub fn at_least(literals: &[i32], k: usize, ids: &mut IdAllocator) -> Result<Vec<Clause>> {
        let n = literals.len();
        if k > n {
            return Err(DeductionError::Cardinality { k, n });
        }
        let negated: Vec<i32> = literals.iter().map(|&l| -l).collect();
        Ok(Self::at_most(&negated, n - k, ids))
    }

    /// Clauses forcing at most `k` of `literals` true
    pub fn at_most(literals: &[i32], k: usize, ids: &mut IdAllocator) -> Vec<Clause> {
        let n = literals.len();
        if k >= n {
            return Vec::new();
        }
        if k == 0 {
            return literals.iter().map(|&l| Clause::unit(-l)).collect();
        }

        // s[i][j]: at least j + 1 of the first i + 1 literals are true
        let registers: Vec<Vec<i32>> = (0..n - 1)
            .map(|_| (0..k).map(|_| ids.fresh()).collect())
            .collect();

        let mut clauses = Vec::new();

        clauses.push(Clause::binary(-literals[0], registers[0][0]));
        for j in 1..k {
            clauses.push(Clause::unit(-registers[0][j]));
        }

        for i in 1..n - 1 {
            let x = literals[i];
            clauses.push(Clause::binary(-x, registers[i][0]));
            clauses.push(Clause::binary(-registers[i - 1][0], registers[i][0]));
            for j in 1..k {
                clauses.push(Clause::new(vec![-x, -registers[i - 1][j - 1], registers[i][j]]));
                clauses.push(Clause::binary(-registers[i - 1][j], registers[i][j]));
            }
            clauses.push(Clause::binary(-x, -registers[i - 1][k - 1]));
        }

        clauses.push(Clause::binary(-literals[n - 1], -registers[n - 2][k - 1]));

        clauses
    }
}

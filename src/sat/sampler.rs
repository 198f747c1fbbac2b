//! Monte-Carlo marginals from randomly relabelled re-solves
//!
//! A SAT solver returns whichever model its search reaches first. Relabelling the
//! variables and shuffling the clauses before each solve steers it to different
//! models; averaging those models gives an approximate marginal per variable. The
//! estimate is a heuristic, not a uniform posterior.

use super::constraints::Clause;
use super::encoder::CnfInstance;
use super::solver::SatSolver;
use crate::error::{DeductionError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// A bijection over variable ids `1..=n`, applied to literals sign-preserving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralPermutation {
    // Index 0 is unused so ids index directly
    forward: Vec<i32>,
    inverse: Vec<i32>,
}

impl LiteralPermutation {
    pub fn identity(n: i32) -> Self {
        let forward: Vec<i32> = (0..=n.max(0)).collect();
        Self {
            inverse: forward.clone(),
            forward,
        }
    }

    pub fn random<R: Rng + ?Sized>(n: i32, rng: &mut R) -> Self {
        let mut targets: Vec<i32> = (1..=n.max(0)).collect();
        targets.shuffle(rng);

        let mut forward = vec![0; targets.len() + 1];
        let mut inverse = vec![0; targets.len() + 1];
        for (from, &to) in (1..).zip(&targets) {
            forward[from as usize] = to;
            inverse[to as usize] = from;
        }
        Self { forward, inverse }
    }

    pub fn map(&self, literal: i32) -> i32 {
        literal.signum() * self.forward[literal.unsigned_abs() as usize]
    }

    pub fn unmap(&self, literal: i32) -> i32 {
        literal.signum() * self.inverse[literal.unsigned_abs() as usize]
    }

    /// A relabelled copy of the clauses; the input is left untouched
    pub fn apply(&self, clauses: &[Clause]) -> Vec<Clause> {
        clauses
            .iter()
            .map(|c| Clause::new(c.literals.iter().map(|&l| self.map(l)).collect()))
            .collect()
    }
}

/// Approximates per-variable marginals by solving `n_samples` shuffled copies of an instance
#[derive(Debug, Clone)]
pub struct ProbabilitySampler {
    n_samples: usize,
}

impl ProbabilitySampler {
    pub fn new(n_samples: usize) -> Self {
        Self { n_samples }
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Mean truth value of every proposition variable, indexed by `id - 1`
    pub fn sample<R: Rng + ?Sized>(&self, instance: &CnfInstance, rng: &mut R) -> Result<Vec<f64>> {
        let n_props = instance.n_propositions;
        let mut counts = vec![0usize; n_props];

        for _ in 0..self.n_samples {
            let permutation = LiteralPermutation::random(instance.n_literals, rng);
            let mut clauses = permutation.apply(&instance.clauses);
            for clause in clauses.iter_mut() {
                clause.literals.shuffle(rng);
            }
            clauses.shuffle(rng);

            let mut solver = SatSolver::new();
            solver.add_clauses(&clauses)?;
            let model = solver.solve()?.ok_or(DeductionError::Unsolvable)?;

            for (slot, id) in counts.iter_mut().zip(1..) {
                if model.value(permutation.map(id)) {
                    *slot += 1;
                }
            }
        }

        debug!(
            samples = self.n_samples,
            variables = n_props,
            "sampled approximate marginals"
        );

        let denominator = self.n_samples.max(1) as f64;
        Ok(counts.into_iter().map(|c| c as f64 / denominator).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn exactly_one_of_two() -> CnfInstance {
        CnfInstance {
            clauses: vec![Clause::binary(1, 2), Clause::binary(-1, -2)],
            n_literals: 2,
            n_propositions: 2,
        }
    }

    #[test]
    fn test_permutation_is_a_bijection() {
        let mut rng = StdRng::seed_from_u64(7);
        let permutation = LiteralPermutation::random(50, &mut rng);

        let mut images: Vec<i32> = (1..=50).map(|id| permutation.map(id)).collect();
        images.sort_unstable();
        assert_eq!(images, (1..=50).collect::<Vec<_>>());

        for lit in [-50, -3, 1, 17, 50] {
            assert_eq!(permutation.unmap(permutation.map(lit)), lit);
            assert_eq!(permutation.map(lit).signum(), lit.signum());
        }
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let original = exactly_one_of_two().clauses;
        let permutation = LiteralPermutation::random(2, &mut StdRng::seed_from_u64(3));
        let copy = permutation.apply(&original);
        assert_eq!(original, exactly_one_of_two().clauses);
        assert_eq!(copy.len(), original.len());

        let identity = LiteralPermutation::identity(2);
        assert_eq!(identity.apply(&original), original);
    }

    #[test]
    fn test_exclusive_pair_marginals_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let marginals = ProbabilitySampler::new(200)
            .sample(&exactly_one_of_two(), &mut rng)
            .unwrap();

        assert_eq!(marginals.len(), 2);
        for p in &marginals {
            assert!((0.0..=1.0).contains(p));
        }
        assert!((marginals[0] + marginals[1] - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_forced_variable_has_probability_one() {
        let instance = CnfInstance {
            clauses: vec![Clause::unit(1), Clause::binary(-1, -2), Clause::new(vec![2, 3])],
            n_literals: 3,
            n_propositions: 3,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let marginals = ProbabilitySampler::new(20).sample(&instance, &mut rng).unwrap();
        assert_eq!(marginals, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unsatisfiable_instance_fails() {
        let instance = CnfInstance {
            clauses: vec![Clause::unit(1), Clause::unit(-1)],
            n_literals: 1,
            n_propositions: 1,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = ProbabilitySampler::new(3).sample(&instance, &mut rng);
        assert_eq!(result, Err(DeductionError::Unsolvable));
    }
}

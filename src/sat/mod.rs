//! SAT components: variable numbering, CNF compilation, solving and sampling

pub mod constraints;
pub mod deduction;
pub mod encoder;
pub mod sampler;
pub mod solver;
pub mod variables;

pub use constraints::{CardinalityEncoder, Clause, IdAllocator};
pub use deduction::{Deduction, DeductionSolver};
pub use encoder::{CnfCompiler, CnfInstance};
pub use sampler::{LiteralPermutation, ProbabilitySampler};
pub use solver::{SatSolver, SolverSolution};
pub use variables::PropositionIndex;

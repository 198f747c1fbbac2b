//! Per-agent knowledge state and the inference queries run against it

pub mod probabilities;
pub mod state;

pub use probabilities::ProbabilityTable;
pub use state::{Agent, AgentKind};

//! Case-file deduction for the murder-mystery card game
//!
//! Each agent's observations are turned into propositional equations over
//! "holder has card" variables, compiled to CNF with exact-cardinality
//! constraints, and handed to a SAT solver to decide which case-file cards
//! are forced. Approximate probabilities come from re-solving randomly
//! relabelled copies of the same instance.

pub mod agent;
pub mod cards;
pub mod config;
pub mod error;
pub mod game;
pub mod knowledge;
pub mod logic;
pub mod sat;
pub mod utils;

pub use agent::{Agent, AgentKind, ProbabilityTable};
pub use cards::{Card, Catalog, Category, Crime};
pub use config::Settings;
pub use error::{DeductionError, Result};
pub use game::{GameSummary, Simulation};
pub use logic::{Equation, Event, Holder, Proposition};

/// Deal and play a complete bot game
pub fn simulate(settings: &Settings) -> anyhow::Result<GameSummary> {
    let mut simulation = Simulation::from_settings(settings)?;
    simulation.run()
}

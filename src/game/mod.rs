//! Bot games: dealing, guessing, and the turn loop that feeds every agent's log

pub mod setup;
pub mod simulator;
pub mod strategy;

pub use setup::GameSetup;
pub use simulator::{AgentOutcome, GameSummary, Simulation};
pub use strategy::{answer_guess, GuessStrategy};

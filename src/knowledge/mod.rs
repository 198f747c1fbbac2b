//! Game knowledge: the per-agent turn log and the equations derived from it

pub mod builder;
pub mod log;

pub use builder::KnowledgeBuilder;
pub use log::{CardReveal, GameLog, GameLogEntry, Reveal};

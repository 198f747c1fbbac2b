//! Boolean "holder has card" propositions and the event algebra built on them

pub mod event;
pub mod proposition;

pub use event::{Equation, Event};
pub use proposition::{Holder, Proposition};

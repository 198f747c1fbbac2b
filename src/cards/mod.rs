//! Cards, crimes and the deck catalog

pub mod card;
pub mod catalog;
pub mod crime;

pub use card::{Card, Category};
pub use catalog::Catalog;
pub use crime::Crime;

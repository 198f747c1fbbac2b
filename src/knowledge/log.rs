//! Append-only record of what one agent has observed, one entry per turn

use crate::cards::{Card, Crime};
use crate::error::{DeductionError, Result};
use crate::logic::Holder;

/// What a responder showed, as far as the observing agent can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reveal {
    /// This exact card was shown to the observer
    Card(Card),
    /// A card was shown to someone else; its identity is hidden
    Unknown,
    /// No card was shown
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardReveal {
    pub responder: Holder,
    pub reveal: Reveal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLogEntry {
    pub turn_index: usize,
    /// Who made the guess; `None` for bookkeeping turns such as the opening one
    pub turn_holder: Option<Holder>,
    pub guess: Option<Crime>,
    pub reveals: Vec<CardReveal>,
}

/// Turn entries indexed by turn number. Only the newest entry accepts reveals;
/// starting a new turn closes the previous one.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    entries: Vec<GameLogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the entry for `turn_index`, which must directly follow the last one
    pub fn add_entry(
        &mut self,
        turn_index: usize,
        turn_holder: Option<Holder>,
        guess: Option<Crime>,
    ) -> Result<()> {
        let expected = self.entries.len();
        if turn_index != expected {
            return Err(DeductionError::TurnOutOfOrder {
                expected,
                got: turn_index,
            });
        }

        self.entries.push(GameLogEntry {
            turn_index,
            turn_holder,
            guess,
            reveals: Vec::new(),
        });
        Ok(())
    }

    /// Append a reveal to the open turn
    pub fn record_reveal(&mut self, turn_index: usize, responder: Holder, reveal: Reveal) -> Result<()> {
        let open = self.open_turn().ok_or(DeductionError::UnknownTurn(turn_index))?;
        if turn_index > open {
            return Err(DeductionError::UnknownTurn(turn_index));
        }
        if turn_index < open {
            return Err(DeductionError::TurnClosed {
                turn: turn_index,
                open,
            });
        }

        let entry = &mut self.entries[open];
        if entry.turn_holder == Some(responder) {
            return Err(DeductionError::SelfReveal(responder.to_string()));
        }
        if entry.guess.is_none() && !matches!(reveal, Reveal::Card(_)) {
            return Err(DeductionError::MissingGuess(turn_index));
        }

        entry.reveals.push(CardReveal { responder, reveal });
        Ok(())
    }

    pub fn entries(&self) -> &[GameLogEntry] {
        &self.entries
    }

    pub fn entry(&self, turn_index: usize) -> Option<&GameLogEntry> {
        self.entries.get(turn_index)
    }

    /// Turn index still accepting reveals
    pub fn open_turn(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! An agent's private log and the deduction queries answered from it

use super::ProbabilityTable;
use crate::cards::{Card, Catalog, Crime};
use crate::error::Result;
use crate::knowledge::{GameLog, KnowledgeBuilder, Reveal};
use crate::logic::{Equation, Holder, Proposition};
use crate::sat::{CnfCompiler, CnfInstance, Deduction, DeductionSolver, ProbabilitySampler, PropositionIndex};
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentKind {
    /// Watches the game without holding cards
    Observer,
    /// Sits at the table and knows its own hand
    Player { hand: Vec<Card> },
}

impl AgentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Observer => "Observer",
            AgentKind::Player { .. } => "Player",
        }
    }
}

/// One participant's view of the game.
///
/// Logging methods only mutate the log. Inference runs on demand and rebuilds the
/// knowledge base from scratch each time; free case-file propositions are cached
/// per completed turn.
#[derive(Debug, Clone)]
pub struct Agent {
    index: usize,
    kind: AgentKind,
    players: Vec<usize>,
    catalog: Catalog,
    propositions: PropositionIndex,
    log: GameLog,
    free_by_turn: HashMap<usize, Vec<Proposition>>,
}

impl Agent {
    pub fn observer(index: usize, players: Vec<usize>, catalog: Catalog) -> Self {
        Self::new(index, AgentKind::Observer, players, catalog)
    }

    /// A player seated at `index` holding `hand`
    pub fn player(index: usize, players: Vec<usize>, catalog: Catalog, hand: Vec<Card>) -> Self {
        Self::new(index, AgentKind::Player { hand }, players, catalog)
    }

    fn new(index: usize, kind: AgentKind, players: Vec<usize>, catalog: Catalog) -> Self {
        let propositions = PropositionIndex::new(&players, &catalog);
        Self {
            index,
            kind,
            players,
            catalog,
            propositions,
            log: GameLog::new(),
            free_by_turn: HashMap::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> &AgentKind {
        &self.kind
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, AgentKind::Player { .. })
    }

    pub fn hand(&self) -> &[Card] {
        match &self.kind {
            AgentKind::Player { hand } => hand,
            AgentKind::Observer => &[],
        }
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn n_cards_per_player(&self) -> usize {
        self.catalog.n_cards_per_player(self.players.len())
    }

    pub fn n_extra_cards(&self) -> usize {
        self.catalog.n_extra_cards(self.players.len())
    }

    /// Open the log entry for a new turn
    pub fn add_log_entry(&mut self, turn_index: usize, turn_holder: Option<Holder>, guess: Option<Crime>) -> Result<()> {
        self.log.add_entry(turn_index, turn_holder, guess)
    }

    pub fn record_reveal(&mut self, turn_index: usize, responder: Holder, reveal: Reveal) -> Result<()> {
        self.log.record_reveal(turn_index, responder, reveal)
    }

    /// Record that each responder passed on the turn's guess
    pub fn record_pass_block(&mut self, turn_index: usize, responders: &[Holder]) -> Result<()> {
        for &responder in responders {
            self.record_reveal(turn_index, responder, Reveal::Pass)?;
        }
        Ok(())
    }

    /// Record that the undealt cards were inspected
    pub fn record_extra_cards(&mut self, turn_index: usize, cards: &[Card]) -> Result<()> {
        for &card in cards {
            self.record_reveal(turn_index, Holder::ExtraCards, Reveal::Card(card))?;
        }
        Ok(())
    }

    /// Everything the agent currently knows, as equations
    pub fn equations(&self) -> Result<Vec<Equation>> {
        let builder = KnowledgeBuilder::new(&self.catalog, &self.players);
        let hand = match &self.kind {
            AgentKind::Player { hand } => Some((self.index, hand.as_slice())),
            AgentKind::Observer => None,
        };
        builder.build(&self.log, hand)
    }

    pub fn compile(&self) -> Result<CnfInstance> {
        let equations = self.equations()?;
        CnfCompiler::new(&self.propositions, self.n_cards_per_player()).compile(&equations)
    }

    pub fn deduce(&self) -> Result<Deduction> {
        let instance = self.compile()?;
        DeductionSolver::new(&self.propositions).deduce(&instance)
    }

    /// Case-file propositions not yet forced. Results for a given turn are computed
    /// once and reused; `None` always recomputes.
    pub fn free_case_file_propositions(&mut self, turn_index: Option<usize>) -> Result<Vec<Proposition>> {
        if let Some(free) = turn_index.and_then(|turn| self.free_by_turn.get(&turn)) {
            return Ok(free.clone());
        }

        let free = self.deduce()?.free;
        debug!(agent = self.index, turn = ?turn_index, free = free.len(), "computed free case-file propositions");
        if let Some(turn) = turn_index {
            self.free_by_turn.insert(turn, free.clone());
        }
        Ok(free)
    }

    /// Whether the remaining ambiguity is small enough to be hiding among the extra cards
    pub fn must_see_extra_cards(&mut self, turn_index: usize) -> Result<bool> {
        let free_count = self.free_case_file_propositions(Some(turn_index))?.len();
        Ok(free_count > 1 && free_count - 1 <= self.n_extra_cards())
    }

    /// The crime, if current knowledge determines it
    pub fn try_solve(&self) -> Result<Option<Crime>> {
        let crime = self.deduce()?.crime;
        if let Some(crime) = &crime {
            info!(agent = self.index, kind = self.kind.label(), %crime, "case file determined");
        }
        Ok(crime)
    }

    /// Approximate probability of every holder/card pair
    pub fn probabilities<R: Rng + ?Sized>(&self, sampler: &ProbabilitySampler, rng: &mut R) -> Result<ProbabilityTable> {
        let instance = self.compile()?;
        let marginals = sampler.sample(&instance, rng)?;
        Ok(ProbabilityTable::from_marginals(&self.propositions.propositions(), &marginals))
    }
}

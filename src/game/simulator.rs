//! The turn loop of a bot game

use super::setup::GameSetup;
use super::strategy::{answer_guess, GuessStrategy};
use crate::cards::{Card, Catalog, Crime};
use crate::config::Settings;
use crate::knowledge::Reveal;
use crate::logic::Holder;
use crate::sat::ProbabilitySampler;
use crate::utils::ProbabilityReport;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

/// How one agent fared
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentOutcome {
    pub agent_index: usize,
    pub agent_kind: String,
    pub solved_turn: Option<usize>,
    pub solution: Option<Crime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub crime: Crime,
    pub turns_played: usize,
    pub outcomes: Vec<AgentOutcome>,
    pub reports: Vec<ProbabilityReport>,
}

impl GameSummary {
    pub fn all_solved(&self) -> bool {
        self.outcomes.iter().all(|o| o.solved_turn.is_some())
    }
}

/// Runs a game between bot players, with observers watching
pub struct Simulation {
    setup: GameSetup,
    strategy: GuessStrategy,
    reveal_extra_cards_first: bool,
    max_turns: usize,
    sampler: Option<ProbabilitySampler>,
    game_id: u64,
    rng: StdRng,
}

impl Simulation {
    pub fn new(setup: GameSetup, rng: StdRng) -> Self {
        Self {
            setup,
            strategy: GuessStrategy::default(),
            reveal_extra_cards_first: false,
            max_turns: 200,
            sampler: None,
            game_id: 0,
            rng,
        }
    }

    /// Deal a standard game as described by the settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut rng = match settings.game.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let game_id = rng.gen();

        let setup = GameSetup::deal(
            &Catalog::standard(),
            settings.game.n_players,
            settings.game.n_observers,
            &mut rng,
        )
        .context("Failed to deal the game")?;

        let mut simulation = Self::new(setup, rng)
            .with_strategy(settings.game.guess_strategy)
            .with_max_turns(settings.game.max_turns)
            .with_game_id(game_id)
            .reveal_extra_cards_first(settings.game.reveal_extra_cards_first);
        if settings.sampler.enabled {
            simulation = simulation.with_sampler(ProbabilitySampler::new(settings.sampler.n_samples));
        }
        Ok(simulation)
    }

    pub fn with_strategy(mut self, strategy: GuessStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_sampler(mut self, sampler: ProbabilitySampler) -> Self {
        self.sampler = Some(sampler);
        self
    }

    pub fn with_game_id(mut self, game_id: u64) -> Self {
        self.game_id = game_id;
        self
    }

    pub fn reveal_extra_cards_first(mut self, reveal: bool) -> Self {
        self.reveal_extra_cards_first = reveal;
        self
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    /// Let `guesser` pick a guess and play it out
    pub fn run_turn(&mut self, turn_index: usize, guesser: usize) -> Result<Option<(usize, Card)>> {
        let guess = self
            .strategy
            .make_guess(&mut self.setup.agents[guesser], &mut self.rng)
            .with_context(|| format!("Player {} failed to make a guess", guesser))?;
        self.play_guess(turn_index, guesser, guess)
    }

    /// Log the guess with every agent, then ask the other players in seat order after
    /// the guesser until one shows a card. Returns the responder and the card shown.
    pub fn play_guess(&mut self, turn_index: usize, guesser: usize, guess: Crime) -> Result<Option<(usize, Card)>> {
        debug!(turn = turn_index, guesser, %guess, "guess made");
        for agent in &mut self.setup.agents {
            agent.add_log_entry(turn_index, Some(Holder::Player(guesser)), Some(guess))?;
        }

        let n_players = self.setup.n_players;
        for offset in 1..n_players {
            let responder = (guesser + offset) % n_players;
            let shown = answer_guess(self.setup.agents[responder].hand(), &guess, &mut self.rng);

            for agent in &mut self.setup.agents {
                let reveal = match shown {
                    Some(card) if agent.index() == guesser => Reveal::Card(card),
                    Some(_) => Reveal::Unknown,
                    None => Reveal::Pass,
                };
                if agent.index() != responder {
                    agent.record_reveal(turn_index, Holder::Player(responder), reveal)?;
                }
            }

            if let Some(card) = shown {
                debug!(turn = turn_index, responder, "card shown");
                return Ok(Some((responder, card)));
            }
        }

        Ok(None)
    }

    /// Play until every agent has solved the crime or the turn limit is reached
    pub fn run(&mut self) -> Result<GameSummary> {
        let extra_cards = self.setup.extra_cards.clone();
        for agent in &mut self.setup.agents {
            agent.add_log_entry(0, None, None)?;
            if !extra_cards.is_empty() && self.reveal_extra_cards_first {
                agent.record_extra_cards(0, &extra_cards)?;
            }
        }

        let mut outcomes: Vec<AgentOutcome> = self
            .setup
            .agents
            .iter()
            .map(|agent| AgentOutcome {
                agent_index: agent.index(),
                agent_kind: agent.kind().label().to_string(),
                solved_turn: None,
                solution: None,
            })
            .collect();
        let mut reports = Vec::new();
        let mut turn_index = 0;

        'game: while turn_index < self.max_turns {
            for guesser in 0..self.setup.n_players {
                if turn_index >= self.max_turns {
                    break 'game;
                }

                if let Some(sampler) = &self.sampler {
                    for agent in &self.setup.agents {
                        let table = agent.probabilities(sampler, &mut self.rng)?;
                        reports.push(ProbabilityReport::new(self.game_id, agent, turn_index, &table));
                    }
                }

                turn_index += 1;
                self.run_turn(turn_index, guesser)?;

                for (agent, outcome) in self.setup.agents.iter_mut().zip(outcomes.iter_mut()) {
                    if outcome.solved_turn.is_some() {
                        continue;
                    }
                    if !extra_cards.is_empty()
                        && !self.reveal_extra_cards_first
                        && agent.must_see_extra_cards(turn_index)?
                    {
                        warn!(agent = agent.index(), turn = turn_index, "remaining ambiguity fits in the extra cards, revealing them");
                        agent.record_extra_cards(turn_index, &extra_cards)?;
                    }
                    if let Some(crime) = agent.try_solve()? {
                        outcome.solved_turn = Some(turn_index);
                        outcome.solution = Some(crime);
                    }
                }

                if outcomes.iter().all(|o| o.solved_turn.is_some()) {
                    info!(turn = turn_index, "every agent has solved the crime");
                    break 'game;
                }
            }
        }

        Ok(GameSummary {
            crime: self.setup.crime,
            turns_played: turn_index,
            outcomes,
            reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::knowledge::CardReveal;

    /// Crime plum/knife/spa; player 0 holds hall, 1 holds mustard, 2 holds rope; agent 3 observes
    fn small_game() -> Simulation {
        let catalog = Catalog::new(&["mustard", "plum"], &["rope", "knife"], &["hall", "spa"]).unwrap();
        let players = vec![0, 1, 2];
        let agents = vec![
            Agent::player(0, players.clone(), catalog.clone(), vec![Card::room("hall")]),
            Agent::player(1, players.clone(), catalog.clone(), vec![Card::character("mustard")]),
            Agent::player(2, players.clone(), catalog.clone(), vec![Card::weapon("rope")]),
            Agent::observer(3, players, catalog),
        ];
        let setup = GameSetup {
            crime: Crime {
                character: Card::character("plum"),
                weapon: Card::weapon("knife"),
                room: Card::room("spa"),
            },
            extra_cards: Vec::new(),
            agents,
            n_players: 3,
        };
        Simulation::new(setup, StdRng::seed_from_u64(0))
    }

    fn reveals(simulation: &Simulation, agent: usize, turn: usize) -> Vec<CardReveal> {
        simulation.setup().agents[agent].log().entry(turn).unwrap().reveals.clone()
    }

    #[test]
    fn test_first_responder_shows_a_card() {
        let mut simulation = small_game();
        for agent in &mut simulation.setup.agents {
            agent.add_log_entry(0, None, None).unwrap();
        }

        let guess = Crime {
            character: Card::character("mustard"),
            weapon: Card::weapon("knife"),
            room: Card::room("spa"),
        };
        let shown = simulation.play_guess(1, 0, guess).unwrap();
        assert_eq!(shown, Some((1, Card::character("mustard"))));

        let to_guesser = CardReveal {
            responder: Holder::Player(1),
            reveal: Reveal::Card(Card::character("mustard")),
        };
        let hidden = CardReveal {
            responder: Holder::Player(1),
            reveal: Reveal::Unknown,
        };
        assert_eq!(reveals(&simulation, 0, 1), vec![to_guesser]);
        assert!(reveals(&simulation, 1, 1).is_empty());
        assert_eq!(reveals(&simulation, 2, 1), vec![hidden]);
        assert_eq!(reveals(&simulation, 3, 1), vec![hidden]);
    }

    #[test]
    fn test_passes_are_recorded_until_a_card_is_shown() {
        let mut simulation = small_game();
        for agent in &mut simulation.setup.agents {
            agent.add_log_entry(0, None, None).unwrap();
        }

        // Player 2 is asked first and passes, then player 0 shows the hall
        let guess = Crime {
            character: Card::character("plum"),
            weapon: Card::weapon("knife"),
            room: Card::room("hall"),
        };
        let shown = simulation.play_guess(1, 1, guess).unwrap();
        assert_eq!(shown, Some((0, Card::room("hall"))));

        let pass = CardReveal {
            responder: Holder::Player(2),
            reveal: Reveal::Pass,
        };
        assert_eq!(
            reveals(&simulation, 1, 1),
            vec![
                pass,
                CardReveal {
                    responder: Holder::Player(0),
                    reveal: Reveal::Card(Card::room("hall")),
                }
            ]
        );
        assert_eq!(
            reveals(&simulation, 3, 1),
            vec![
                pass,
                CardReveal {
                    responder: Holder::Player(0),
                    reveal: Reveal::Unknown,
                }
            ]
        );
        assert_eq!(
            reveals(&simulation, 2, 1),
            vec![CardReveal {
                responder: Holder::Player(0),
                reveal: Reveal::Unknown,
            }]
        );
    }

    #[test]
    fn test_unanswered_guess() {
        let mut simulation = small_game();
        for agent in &mut simulation.setup.agents {
            agent.add_log_entry(0, None, None).unwrap();
        }
        let crime = simulation.setup().crime;
        let shown = simulation.play_guess(1, 0, crime).unwrap();
        assert_eq!(shown, None);
        assert_eq!(reveals(&simulation, 0, 1).len(), 2);
        assert_eq!(reveals(&simulation, 3, 1).len(), 2);

        // Passing on the true crime tells the guesser everything
        assert_eq!(simulation.setup().agents[0].try_solve().unwrap(), Some(crime));
    }

    #[test]
    fn test_game_solutions_are_correct() {
        let settings = {
            let mut s = Settings::default();
            s.game.n_players = 3;
            s.game.seed = Some(7);
            s.game.max_turns = 150;
            s
        };
        let mut simulation = Simulation::from_settings(&settings).unwrap();
        let summary = simulation.run().unwrap();

        assert!(summary.turns_played <= 150);
        assert_eq!(summary.outcomes.len(), 4);
        assert!(summary.reports.is_empty());
        for outcome in &summary.outcomes {
            if let Some(solution) = outcome.solution {
                assert_eq!(solution, summary.crime);
                assert!(outcome.solved_turn.is_some());
            }
        }
        assert!(summary.outcomes.iter().any(|o| o.agent_kind == "Player" && o.solution.is_some()));
    }

    #[test]
    fn test_sampling_and_extra_cards_first() {
        let settings = {
            let mut s = Settings::default();
            s.game.n_players = 4;
            s.game.seed = Some(21);
            s.game.max_turns = 3;
            s.game.reveal_extra_cards_first = true;
            s.sampler.enabled = true;
            s.sampler.n_samples = 3;
            s
        };
        let mut simulation = Simulation::from_settings(&settings).unwrap();
        let summary = simulation.run().unwrap();

        let n_agents = simulation.setup().agents.len();
        assert_eq!(n_agents, 5);
        assert!(summary.turns_played <= 3);
        assert_eq!(summary.reports.len(), summary.turns_played * n_agents);
        assert!(summary.reports.iter().all(|r| r.entries.len() == 6 * 24));
        assert!(summary.reports.iter().all(|r| r.game_id == simulation.game_id()));

        let extra = simulation.setup().extra_cards.clone();
        assert_eq!(extra.len(), 1);
        for agent in &simulation.setup().agents {
            let opening = &agent.log().entry(0).unwrap().reveals;
            assert_eq!(opening.len(), 1);
            assert_eq!(opening[0].responder, Holder::ExtraCards);
            assert_eq!(opening[0].reveal, Reveal::Card(extra[0]));
        }
    }
}

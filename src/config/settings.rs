//! Configuration settings for simulated games

use crate::cards::Catalog;
use crate::game::GuessStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub game: GameConfig,
    pub sampler: SamplerConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub n_players: usize,
    pub n_observers: usize,
    pub guess_strategy: GuessStrategy,
    /// Show the undealt cards to every agent before the first guess
    pub reveal_extra_cards_first: bool,
    pub max_turns: usize,
    /// Fixed seed for a reproducible game; drawn from entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub enabled: bool,
    pub n_samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON-lines file receiving probability reports
    pub probabilities_file: Option<PathBuf>,
    pub show_probabilities: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig {
                n_players: 4,
                n_observers: 1,
                guess_strategy: GuessStrategy::RandomFreeCaseFile,
                reveal_extra_cards_first: false,
                max_turns: 200,
                seed: None,
            },
            sampler: SamplerConfig {
                enabled: false,
                n_samples: 100,
            },
            output: OutputConfig {
                probabilities_file: None,
                show_probabilities: false,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings against the standard deck
    pub fn validate(&self) -> Result<()> {
        if self.game.n_players < 2 {
            anyhow::bail!("At least two players are required, got {}", self.game.n_players);
        }

        if Catalog::standard().n_cards_per_player(self.game.n_players) == 0 {
            anyhow::bail!("Too many players ({}) to deal every player a card", self.game.n_players);
        }

        if self.game.max_turns == 0 {
            anyhow::bail!("Maximum number of turns must be positive");
        }

        if self.sampler.n_samples == 0 {
            anyhow::bail!("Number of probability samples must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(players) = cli_overrides.players {
            self.game.n_players = players;
        }
        if let Some(observers) = cli_overrides.observers {
            self.game.n_observers = observers;
        }
        if let Some(seed) = cli_overrides.seed {
            self.game.seed = Some(seed);
        }
        if let Some(samples) = cli_overrides.samples {
            self.sampler.enabled = true;
            self.sampler.n_samples = samples;
        }
        if let Some(ref output) = cli_overrides.output {
            self.output.probabilities_file = Some(output.clone());
        }
        if cli_overrides.verbose {
            self.logging.level = "debug".to_string();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub players: Option<usize>,
    pub observers: Option<usize>,
    pub seed: Option<u64>,
    /// Enables sampling with this many samples
    pub samples: Option<usize>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

//! Main CLI application for the case-file solver

use anyhow::{Context, Result};
use case_file_solver::{
    config::{CliOverrides, Settings},
    game::Simulation,
    sat::ProbabilitySampler,
    utils::{init_logging, ColorOutput, ProbabilityFormatter, ReportWriter},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "case_file_solver")]
#[command(about = "SAT-based case-file deduction for bot games")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deal and play a game between bots
    Simulate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of players (overrides config)
        #[arg(short, long)]
        players: Option<usize>,

        /// Number of observers (overrides config)
        #[arg(long)]
        observers: Option<usize>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Enable probability sampling with this many samples
        #[arg(long)]
        samples: Option<usize>,

        /// File receiving probability reports as JSON lines
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a default configuration
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            players,
            observers,
            seed,
            samples,
            output,
            verbose,
        } => {
            let overrides = CliOverrides {
                players,
                observers,
                seed,
                samples,
                output,
                verbose,
            };
            simulate_command(config, overrides)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path).with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Config file {} not found, using defaults", config_path.display()))
        );
        Ok(Settings::default())
    }
}

fn simulate_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;
    init_logging(&settings.logging);

    if overrides.verbose {
        println!("Configuration:");
        println!("  Players: {}", settings.game.n_players);
        println!("  Observers: {}", settings.game.n_observers);
        println!("  Guess strategy: {:?}", settings.game.guess_strategy);
        println!("  Max turns: {}", settings.game.max_turns);
        if settings.sampler.enabled {
            println!("  Samples per report: {}", settings.sampler.n_samples);
        }
        println!();
    }

    println!("{}", ColorOutput::info("Dealing the cards..."));
    let start_time = Instant::now();
    let mut simulation = Simulation::from_settings(&settings)?;
    let summary = simulation.run().context("Game simulation failed")?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Game {} finished after {} turns in {:.3}s",
            simulation.game_id(),
            summary.turns_played,
            start_time.elapsed().as_secs_f64()
        ))
    );
    println!("\n{}", ProbabilityFormatter::format_summary(&summary));

    if !summary.all_solved() {
        println!(
            "{}",
            ColorOutput::warning(&format!("Turn limit of {} reached before every agent solved the crime", settings.game.max_turns))
        );
    }

    if settings.output.show_probabilities {
        let sampler = ProbabilitySampler::new(settings.sampler.n_samples);
        let mut rng = rand::thread_rng();
        for agent in &simulation.setup().agents {
            let table = agent
                .probabilities(&sampler, &mut rng)
                .with_context(|| format!("Failed to sample probabilities for agent {}", agent.index()))?;
            println!("{}", ColorOutput::info(&format!("{} {}:", agent.kind().label(), agent.index())));
            println!("{}", ProbabilityFormatter::format_table(&table));
        }
    }

    if let Some(path) = &settings.output.probabilities_file {
        if summary.reports.is_empty() {
            println!("{}", ColorOutput::warning("Sampling is disabled, no probability reports to save"));
        } else {
            ReportWriter::new(path).append(&summary.reports).context("Failed to save probability reports")?;
            println!(
                "{}",
                ColorOutput::success(&format!("Saved {} probability reports to {}", summary.reports.len(), path.display()))
            );
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let output_dir = directory.join("output");
    for dir in [&config_dir, &output_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut sampling = Settings::default();
    sampling.sampler.enabled = true;
    sampling.output.probabilities_file = Some(output_dir.join("probabilities.jsonl"));
    sampling.to_file(&examples_dir.join("sampling.yaml"))?;

    let mut observed = Settings::default();
    observed.game.n_players = 3;
    observed.game.n_observers = 2;
    observed.game.reveal_extra_cards_first = true;
    observed.to_file(&examples_dir.join("observed.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- simulate --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "case_file_solver",
            "simulate",
            "--config",
            "test.yaml",
            "--players",
            "5",
            "--samples",
            "20",
        ]);

        match cli.unwrap().command {
            Commands::Simulate { players, samples, .. } => {
                assert_eq!(players, Some(5));
                assert_eq!(samples, Some(20));
            }
            Commands::Setup { .. } => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config_path = temp_dir.path().join("config/default.yaml");
        assert!(config_path.exists());
        assert_eq!(Settings::from_file(&config_path).unwrap(), Settings::default());
        assert!(temp_dir.path().join("config/examples/sampling.yaml").exists());
    }

    #[test]
    fn test_setup_keeps_existing_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config/default.yaml");
        let mut custom = Settings::default();
        custom.game.n_players = 6;
        custom.to_file(&config_path).unwrap();

        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        assert_eq!(Settings::from_file(&config_path).unwrap().game.n_players, 6);

        setup_command(temp_dir.path().to_path_buf(), true).unwrap();
        assert_eq!(Settings::from_file(&config_path).unwrap(), Settings::default());
    }
}

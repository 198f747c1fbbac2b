//! Configuration management for bot games

pub mod settings;

pub use settings::{CliOverrides, GameConfig, LoggingConfig, OutputConfig, SamplerConfig, Settings};

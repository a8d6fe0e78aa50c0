//! Command-line flags shared by the terminal and window front-ends.

use std::path::PathBuf;

use clap::Parser;

use crate::config::GameConfig;
use crate::error::ConfigError;

/// Water sort: pour blocks between containers until each holds one type
#[derive(Parser, Debug)]
#[command(
    name = "water-sort",
    version,
    about = "Pour blocks between containers until each holds one type",
    long_about = "Pour blocks between containers until each holds one type.\n\n\
                  Each turn, enter two digits FT: F is the container to pour from,\n\
                  T the container to pour into. Only the top run of one type moves,\n\
                  and only onto an empty container or the same type."
)]
pub struct Cli {
    /// TOML file with game settings; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of block types
    #[arg(short, long)]
    pub types: Option<usize>,

    /// Blocks per container
    #[arg(short = 'n', long)]
    pub capacity: Option<usize>,

    /// Number of containers that start empty
    #[arg(short, long)]
    pub empty: Option<usize>,

    /// Characters to use as block symbols, e.g. "RGBY"
    #[arg(long)]
    pub symbols: Option<String>,

    /// Seed for a reproducible deal
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Starting board, e.g. "AAB,BBA,," (bottom to top, comma-separated)
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Do not clear the screen between turns
    #[arg(long)]
    pub no_clear: bool,
}

impl Cli {
    /// Resolves the effective configuration: defaults, then the config file,
    /// then flags.
    pub fn resolve(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::read(path)?,
            None => GameConfig::default(),
        };
        if let Some(types) = self.types {
            config.types = types;
        }
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(empty) = self.empty {
            config.empty = empty;
        }
        if let Some(symbols) = &self.symbols {
            config.symbols = symbols.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(layout) = &self.layout {
            config.layout = Some(layout.clone());
        }
        if self.no_color {
            config.color = false;
        }
        config.validate()?;
        Ok(config)
    }
}

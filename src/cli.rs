//! Command-line arguments shared by the binaries.

use std::str::FromStr;

use clap::Args;

use crate::application::{Game, RunSummary};
use crate::config::GameConfig;
use crate::domain::presets;
use crate::error::{GameError, Result};
use crate::imaging::FileLoader;

/// Grid dimensions parsed from a WIDTHxHEIGHT argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let (width, height) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format WIDTHxHEIGHT".to_string())?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid dimension '{part}': {e}"))
        };
        Ok(Self {
            width: parse(width)?,
            height: parse(height)?,
        })
    }
}

/// What to play and how to play it
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Image to seed the run from (path or file: reference, PNG only)
    #[arg(short = 'u', long = "url", value_name = "SOURCE", required_unless_present = "pattern")]
    pub source: Option<String>,
    /// Built-in pattern to seed the run from instead of an image
    #[arg(short = 'p', long, conflicts_with = "source")]
    pub pattern: Option<String>,
    /// Grid size used with --pattern
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "64x64")]
    pub size: GridSize,
    /// Name the run is registered under
    #[arg(short = 'n', long, default_value = "default")]
    pub name: String,
    /// YAML configuration file; flags below override it
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<String>,
    /// Worker threads per generation
    #[arg(short = 'w', long)]
    pub workers: Option<i32>,
    /// Generations to compute
    #[arg(long)]
    pub cycles: Option<usize>,
    /// Magnification factor for rendered images
    #[arg(short = 'm', long = "mag")]
    pub magnification: Option<u32>,
    /// Frame delay in 10ms units
    #[arg(long)]
    pub delay: Option<u32>,
}

impl RunArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_yaml(path)?,
            None => GameConfig::default(),
        };
        if let Some(workers) = self.workers {
            config.worker_count = workers;
        }
        if let Some(cycles) = self.cycles {
            config.max_cycles = cycles;
        }
        if let Some(mag) = self.magnification {
            config.magnification = mag;
        }
        if let Some(delay) = self.delay {
            config.delay_10ms = delay;
        }
        config.validate()?;
        Ok(config)
    }

    /// Build a game from these arguments and play the requested run in it
    pub fn play(&self) -> Result<(Game, RunSummary)> {
        let game = Game::new(self.game_config()?, FileLoader)?;
        let summary = self.play_in(&game)?;
        Ok((game, summary))
    }

    pub fn play_in(&self, game: &Game) -> Result<RunSummary> {
        match (&self.pattern, &self.source) {
            (Some(name), _) => {
                let pattern = presets::by_name(name)
                    .ok_or_else(|| GameError::Config(format!("unknown pattern '{name}'")))?;
                let grid = pattern.centered_in(self.size.width, self.size.height);
                game.create_and_run_grid(&self.name, &format!("pattern:{}", pattern.name), grid)
            }
            (None, Some(source)) => game.create_and_run(&self.name, source),
            (None, None) => Err(GameError::Config("either a source or a pattern is required".into())),
        }
    }
}

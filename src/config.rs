//! Command line options and the validated run configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser, ValueEnum};

use crate::error::{BlifsError, Result};
use crate::random::{RandomSpec, SeedSource};
use crate::render::{DisplayMode, Style};

/// Simulates and generates 2D cellular automata in a console.
#[derive(Debug, Parser)]
#[command(name = "blifs")]
#[command(version)]
#[command(about = "bareLifeSimulator: simulates and generates 2D cellular automata in a console")]
#[command(group(ArgGroup::new("display").args(["verbose", "silent", "summary", "tui"])))]
pub struct Cli {
    /// Load a board file (required unless '-g' is passed)
    #[arg(short, long, value_name = "BOARD_FILE")]
    pub board: Option<PathBuf>,

    /// Load a rules file (required unless '-n 0' is passed)
    #[arg(short, long, value_name = "RULES_FILE")]
    pub rules: Option<PathBuf>,

    /// Output final result as a board file (required when '-g' is passed)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of generations to simulate; 0 only loads, displays and saves
    #[arg(short = 'n', long, default_value_t = 1)]
    pub iterations: u64,

    /// Delay in seconds between displayed generations
    #[arg(short, long, default_value_t = 0.0)]
    pub delay: f64,

    /// Display every generation
    #[arg(short, long)]
    pub verbose: bool,

    /// Don't display any output
    #[arg(short, long)]
    pub silent: bool,

    /// Display only the initial and final generation (default)
    #[arg(short = 'c', long)]
    pub summary: bool,

    /// Full-screen viewer with statistics
    #[arg(long)]
    pub tui: bool,

    /// Wait for Enter before each generation
    #[arg(short, long)]
    pub interactive: bool,

    /// Generate a random <w>x<h> board with a 1/<d> chance of a live cell
    /// (d is optional and 2 by default)
    #[arg(short = 'g', long, value_name = "W:H[:D]")]
    pub generate: Option<String>,

    /// Seed for '-g'; without it the seed comes from the clock
    #[arg(long)]
    pub seed: Option<u64>,

    /// Character for live cells
    #[arg(long, default_value_t = '0')]
    pub fill: char,

    /// Character for dead cells
    #[arg(long, default_value_t = '.')]
    pub empty: char,

    /// Show info on board or rules files
    #[arg(long, value_enum, value_name = "TOPIC")]
    pub explain: Option<Topic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Topic {
    Board,
    Rules,
}

/// What the program does once options are resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Print a file format description.
    Explain(Topic),
    /// Load a board, run it and optionally save it.
    Simulate {
        board: PathBuf,
        /// Absent only when `iterations == 0`
        rules: Option<PathBuf>,
        output: Option<PathBuf>,
        iterations: u64,
    },
    /// Generate a random board and save it.
    Generate {
        spec: RandomSpec,
        seed: SeedSource,
        output: PathBuf,
    },
}

/// A validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub task: Task,
    pub display: DisplayMode,
    pub style: Style,
    pub delay: Duration,
    pub interactive: bool,
}

impl RunConfig {
    /// Resolves command line options.
    ///
    /// # Errors
    ///
    /// * [`BlifsError::MissingInput`] when a required file is not given
    /// * [`BlifsError::InvalidRandomSpec`] for a malformed `-g` argument
    /// * [`BlifsError::InvalidOption`] for a negative or non-finite delay
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let display = if cli.silent {
            DisplayMode::None
        } else if cli.verbose {
            DisplayMode::Verbose
        } else if cli.tui {
            DisplayMode::Tui
        } else {
            DisplayMode::Summary
        };

        let delay = Duration::try_from_secs_f64(cli.delay).map_err(|_| {
            BlifsError::InvalidOption(format!(
                "delay must be a non-negative number of seconds, got {}",
                cli.delay
            ))
        })?;

        let task = if let Some(topic) = cli.explain {
            Task::Explain(topic)
        } else if let Some(generate) = cli.generate {
            let output = cli
                .output
                .ok_or(BlifsError::MissingInput("Output board file"))?;
            Task::Generate {
                spec: generate.parse()?,
                seed: cli.seed.map_or(SeedSource::Clock, SeedSource::Fixed),
                output,
            }
        } else {
            let board = cli.board.ok_or(BlifsError::MissingInput("Input board file"))?;
            let rules = match (cli.rules, cli.iterations) {
                (rules, 0) => rules,
                (Some(rules), _) => Some(rules),
                (None, _) => return Err(BlifsError::MissingInput("Rule file")),
            };
            Task::Simulate {
                board,
                rules,
                output: cli.output,
                iterations: cli.iterations,
            }
        };

        Ok(RunConfig {
            task,
            display,
            style: Style {
                fill: cli.fill,
                empty: cli.empty,
            },
            delay,
            interactive: cli.interactive,
        })
    }
}

//! `blifs` command line entry point.
//!
//! Exit codes: `0` on success, `1` on missing input, malformed files or
//! invalid options.

use std::io::{self, StdinLock};
use std::process::ExitCode;

use blifs::config::{Cli, RunConfig, Task, Topic};
use blifs::format::{self, BOARD_HELP, RULES_HELP};
use blifs::random;
use blifs::render::{ConsoleObserver, DisplayMode};
use blifs::tui::TuiObserver;
use blifs::{Result, Simulation};
use clap::Parser;
use log::{debug, error};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    debug!("{cli:?}");

    match RunConfig::from_cli(cli).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

fn run(config: RunConfig) -> Result<()> {
    match config.task {
        Task::Explain(Topic::Board) => print!("{BOARD_HELP}"),
        Task::Explain(Topic::Rules) => print!("{RULES_HELP}"),

        Task::Generate { spec, seed, output } => {
            let board = random::generate(&spec, seed)?;
            format::save_board(&board, &output)?;

            let display = match config.display {
                DisplayMode::Tui => DisplayMode::Verbose,
                other => other,
            };
            let mut console: ConsoleObserver<_, StdinLock<'static>> =
                ConsoleObserver::new(io::stdout().lock(), display, config.style);
            console.show_generated(&board, &spec)?;
        }

        Task::Simulate {
            board,
            rules,
            output,
            iterations,
        } => {
            let board = format::load_board(&board)?;
            let rules = rules.map(format::load_rules).transpose()?;
            let mut simulation = Simulation::new(board, rules);

            if config.display == DisplayMode::Tui {
                let title = simulation
                    .rules()
                    .map_or_else(|| "blifs".to_string(), ToString::to_string);
                let mut viewer =
                    TuiObserver::new(title, config.style, config.delay, config.interactive)?;
                simulation.run(iterations, &mut viewer)?;
            } else {
                let mut console: ConsoleObserver<_, StdinLock<'static>> =
                    ConsoleObserver::new(io::stdout().lock(), config.display, config.style)
                        .with_delay(config.delay);
                if config.interactive {
                    console = console.interactive(io::stdin().lock());
                }
                console.show_loaded(simulation.board())?;
                simulation.run(iterations, &mut console)?;
            }

            if let Some(output) = output {
                format::save_board(simulation.board(), output)?;
            }
        }
    }
    Ok(())
}

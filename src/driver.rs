//! The generation loop.
//!
//! [`Simulation`] owns the live board and runs the engine until an iteration
//! cap is hit or a generation creates no new cell. Rendering, delays and
//! user input happen in an [`Observer`].

use log::{debug, info};

use crate::board::Board;
use crate::engine::{self, Delta};
use crate::error::{BlifsError, Result};
use crate::rules::RuleTable;

/// Stores statistics about a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Completed generations
    pub generation: u64,
    /// Total number of cells created since start
    pub cells_created: u64,
    /// Total number of cells destroyed since start
    pub cells_destroyed: u64,
    /// Current number of living cells
    pub current_population: u64,
}

impl Stats {
    /// Creates a `Stats` instance for a freshly loaded board.
    pub fn new(board: &Board) -> Self {
        Stats {
            current_population: board.live_count(),
            ..Stats::default()
        }
    }

    /// Average births per completed generation.
    pub fn birth_rate(&self) -> f64 {
        self.cells_created as f64 / self.generation.max(1) as f64
    }

    /// Average deaths per completed generation.
    pub fn death_rate(&self) -> f64 {
        self.cells_destroyed as f64 / self.generation.max(1) as f64
    }

    fn record(&mut self, delta: &Delta, board: &Board) {
        self.cells_created += delta.births();
        self.cells_destroyed += delta.deaths();
        self.current_population = board.live_count();
    }
}

/// What an observer sees after each generation.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub board: &'a Board,
    pub stats: &'a Stats,
    /// The requested iteration count
    pub target: u64,
}

impl Progress<'_> {
    /// Whether the iteration cap has been reached.
    pub fn is_last(&self) -> bool {
        self.stats.generation >= self.target
    }
}

/// Returned by [`Observer::before_generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

/// How a run ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The iteration cap was reached.
    Exhausted { generations: u64 },
    /// A generation created no new cell.
    Static { generations: u64 },
    /// An observer asked to stop between generations.
    Interrupted { generations: u64 },
}

impl Outcome {
    pub fn generations(&self) -> u64 {
        match *self {
            Outcome::Exhausted { generations }
            | Outcome::Static { generations }
            | Outcome::Interrupted { generations } => generations,
        }
    }
}

/// Hooks called by [`Simulation::run`]. Every hook defaults to a no-op.
pub trait Observer {
    /// Called before each generation is computed. Waiting for input or
    /// pausing belongs here.
    fn before_generation(&mut self, _progress: Progress<'_>) -> Result<Control> {
        Ok(Control::Continue)
    }

    /// Called after a changed generation has been applied.
    fn on_generation(&mut self, _progress: Progress<'_>) -> Result<()> {
        Ok(())
    }

    /// Called when a generation created no new cell. The board already
    /// reflects that generation's deaths.
    fn on_static(&mut self, _progress: Progress<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once when the run ends, whatever the outcome.
    fn on_finish(&mut self, _progress: Progress<'_>, _outcome: Outcome) -> Result<()> {
        Ok(())
    }
}

impl Observer for () {}

/// Main state container for one simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    board: Board,
    /// Absent when the board is only loaded and saved
    rules: Option<RuleTable>,
    stats: Stats,
}

impl Simulation {
    pub fn new(board: Board, rules: Option<RuleTable>) -> Self {
        let stats = Stats::new(&board);
        Simulation {
            board,
            rules,
            stats,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> Option<&RuleTable> {
        self.rules.as_ref()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    fn progress(&self, target: u64) -> Progress<'_> {
        Progress {
            board: &self.board,
            stats: &self.stats,
            target,
        }
    }

    /// Computes and applies one generation.
    ///
    /// Returns `true` if at least one cell was created. The delta is applied
    /// either way, but the generation counter only moves on a change.
    ///
    /// # Errors
    ///
    /// Returns [`BlifsError::MissingInput`] if the simulation has no rules.
    pub fn step(&mut self) -> Result<bool> {
        let rules = self.rules.as_ref().ok_or(BlifsError::MissingInput("Rule file"))?;

        let (delta, changed) = engine::step(&self.board, rules);
        engine::apply(&mut self.board, &delta);
        if changed {
            self.stats.generation += 1;
        }
        self.stats.record(&delta, &self.board);

        debug!(
            "generation {}: +{} -{} alive {}",
            self.stats.generation,
            delta.births(),
            delta.deaths(),
            self.board.live_count()
        );
        Ok(changed)
    }

    /// Runs up to `max_iterations` generations, stopping early when the board
    /// is static or the observer stops the run.
    ///
    /// `max_iterations == 0` returns immediately and needs no rules.
    ///
    /// # Errors
    ///
    /// Returns [`BlifsError::MissingInput`] when generations are requested
    /// without rules, and forwards observer errors.
    pub fn run<O: Observer + ?Sized>(
        &mut self,
        max_iterations: u64,
        observer: &mut O,
    ) -> Result<Outcome> {
        if max_iterations > 0 && self.rules.is_none() {
            return Err(BlifsError::MissingInput("Rule file"));
        }

        let start = self.stats.generation;
        let target = start.saturating_add(max_iterations);
        let outcome = loop {
            let generations = self.stats.generation - start;
            if self.stats.generation >= target {
                break Outcome::Exhausted { generations };
            }
            if observer.before_generation(self.progress(target))? == Control::Stop {
                break Outcome::Interrupted { generations };
            }

            if self.step()? {
                observer.on_generation(self.progress(target))?;
            } else {
                observer.on_static(self.progress(target))?;
                break Outcome::Static { generations };
            }
        };

        info!(
            "run finished: {:?}, {} alive of {}",
            outcome,
            self.board.live_count(),
            self.board.area()
        );
        observer.on_finish(self.progress(target), outcome)?;
        Ok(outcome)
    }
}

//! One synchronous generation update.
//!
//! [`step`] reads a board snapshot and produces a [`Delta`] without touching
//! the board, so every cell sees the same previous generation. [`apply`]
//! then folds the delta back in.

use log::trace;

use crate::board::Board;
use crate::neighbors::count_live;
use crate::rules::{RuleTable, Transition};

/// The per-cell transitions of one generation, same shape as its board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    width: usize,
    height: usize,
    /// Row-major, same indexing as [`Board`]
    transitions: Vec<Transition>,
    /// Cells that become alive
    births: u64,
    /// Live cells that become dead
    deaths: u64,
}

impl Delta {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Transition of the cell at `(x, y)`, or `None` outside the delta.
    pub fn get(&self, x: usize, y: usize) -> Option<Transition> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.transitions[y * self.width + x])
    }

    pub fn births(&self) -> u64 {
        self.births
    }

    /// Number of cells that were alive and die. Dead cells that stay dead are
    /// not counted.
    pub fn deaths(&self) -> u64 {
        self.deaths
    }

    /// Signed change of the live-cell count once applied.
    pub fn live_delta(&self) -> i64 {
        self.births as i64 - self.deaths as i64
    }

    /// Whether any cell becomes alive.
    ///
    /// A generation with deaths but no births is *not* a change: the run
    /// treats it as static even though the board lost cells.
    pub fn changed(&self) -> bool {
        self.births > 0
    }
}

/// Computes the next generation of `board` under `rules`.
///
/// Returns the delta and the "changed" signal; see [`Delta::changed`] for
/// what counts as a change.
pub fn step(board: &Board, rules: &RuleTable) -> (Delta, bool) {
    let width = board.width();
    let height = board.height();
    let mut transitions = Vec::with_capacity(width * height);
    let mut births = 0;
    let mut deaths = 0;

    for y in 0..height {
        for x in 0..width {
            let alive = board.alive_at(x, y);
            let transition = rules.decide(alive, count_live(board, x, y));
            match transition {
                Transition::BecomesAlive => births += 1,
                Transition::BecomesDead if alive => deaths += 1,
                _ => {}
            }
            transitions.push(transition);
        }
    }

    trace!("step {width}x{height}: +{births} -{deaths}");

    let delta = Delta {
        width,
        height,
        transitions,
        births,
        deaths,
    };
    let changed = delta.changed();
    (delta, changed)
}

/// Folds `delta` into `board`.
///
/// Cells are overwritten directly and the live counter is moved by
/// [`Delta::live_delta`] instead of being recounted.
///
/// # Panics
///
/// Panics if `delta` was computed for a board of different dimensions.
pub fn apply(board: &mut Board, delta: &Delta) {
    assert_eq!(
        (board.width(), board.height()),
        (delta.width, delta.height),
        "delta does not match the board"
    );

    let (cells, live) = board.cells_mut_with_live();
    for (cell, transition) in cells.iter_mut().zip(&delta.transitions) {
        match transition {
            Transition::Unchanged => {}
            Transition::BecomesAlive => *cell = true,
            Transition::BecomesDead => *cell = false,
        }
    }
    *live = live.wrapping_add_signed(delta.live_delta());

    debug_assert_eq!(board.live_count(), board.count_live_scan());
}

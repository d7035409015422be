//! # blifs
//!
//! A bare life simulator: 2D cellular automata on a fixed-size toroidal grid,
//! driven by neighbor-count rule tables.
//!
//! ## Features
//!
//! * Any survive/create rule over the 8-cell neighborhood (Conway's B3/S23
//!   is one instance)
//! * Toroidal grid implementation
//! * Incrementally maintained live-cell count
//! * Plain-text board and rules files
//! * Random board generation, seeded or clock driven
//! * Console output and an interactive terminal interface
//!
//! ## Quick Start
//!
//! ```rust
//! use blifs::{Board, RuleTable, Simulation, Outcome};
//!
//! let mut board = Board::new(5, 5).unwrap();
//! for x in 1..=3 {
//!     board.set(x, 2, true).unwrap();
//! }
//!
//! let mut simulation = Simulation::new(board, Some(RuleTable::conway()));
//! let outcome = simulation.run(2, &mut ()).unwrap();
//!
//! assert_eq!(outcome, Outcome::Exhausted { generations: 2 });
//! assert_eq!(simulation.board().live_count(), 3);
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use blifs::format;
//!
//! let board = format::load_board("glider.txt").unwrap();
//! let rules = format::load_rules("conway.txt").unwrap();
//! println!("{}x{} board under {}", board.width(), board.height(), rules);
//! ```

pub mod board;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod format;
pub mod neighbors;
pub mod random;
pub mod render;
pub mod rules;
pub mod tui;

pub use board::Board;
pub use driver::{Control, Observer, Outcome, Progress, Simulation, Stats};
pub use engine::Delta;
pub use error::{BlifsError, Result};
pub use random::{RandomSpec, SeedSource};
pub use rules::{RuleTable, Transition};

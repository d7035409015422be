//! Error types shared by the simulator library and binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading, generating or saving a board.
///
/// The update step itself never fails: every error is raised while reading
/// input or resolving options, before the first generation runs.
#[derive(Debug, Error)]
pub enum BlifsError {
    /// A required board, rules or output source was not supplied.
    #[error("{0} required")]
    MissingInput(&'static str),

    #[error("board file has invalid cell definitions (line {line}): {reason}")]
    MalformedBoardFile { line: usize, reason: String },

    #[error("rules file is malformed (line {line}): {reason}")]
    MalformedRulesFile { line: usize, reason: String },

    #[error("invalid arguments for random generation '{0}': expected <w>:<h>[:<d>]")]
    InvalidRandomSpec(String),

    #[error("cannot allocate a {width}x{height} board")]
    AllocationError { width: usize, height: usize },

    /// A coordinate lies outside the board.
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BlifsError>;

//! Neighbor sampling on the toroidal grid.
//!
//! The grid wraps at every edge: column `-1` is column `width - 1` and
//! column `width` is column `0`, likewise for rows. Nothing is clamped or
//! padded.

use crate::board::Board;
use crate::error::{BlifsError, Result};

/// Offsets of the eight neighbors, row above first, center excluded.
pub const OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Returns the states of the 8 cells around `(x, y)`, in [`OFFSETS`] order.
///
/// # Arguments
///
/// * `board` - The board to sample
/// * `x` - The column of the center cell
/// * `y` - The row of the center cell
///
/// # Errors
///
/// Returns [`BlifsError::OutOfRange`] if `(x, y)` is outside the board.
pub fn neighbors(board: &Board, x: usize, y: usize) -> Result<[bool; 8]> {
    check_bounds(board, x, y)?;
    Ok(sample(board, x, y))
}

/// Counts the live cells around `(x, y)`; the center is not included.
///
/// The result is always in `0..=8`.
///
/// # Errors
///
/// Returns [`BlifsError::OutOfRange`] if `(x, y)` is outside the board.
pub fn live_neighbors(board: &Board, x: usize, y: usize) -> Result<u8> {
    check_bounds(board, x, y)?;
    Ok(count_live(board, x, y))
}

/// Unchecked [`neighbors`] for callers iterating over the board's own range.
#[inline]
pub(crate) fn sample(board: &Board, x: usize, y: usize) -> [bool; 8] {
    let mut states = [false; 8];
    for (state, &(dx, dy)) in states.iter_mut().zip(OFFSETS.iter()) {
        let (nx, ny) = wrap(board, x, y, dx, dy);
        *state = board.alive_at(nx, ny);
    }
    states
}

/// Unchecked [`live_neighbors`].
#[inline]
pub(crate) fn count_live(board: &Board, x: usize, y: usize) -> u8 {
    sample(board, x, y).iter().filter(|&&alive| alive).count() as u8
}

fn check_bounds(board: &Board, x: usize, y: usize) -> Result<()> {
    if x >= board.width() || y >= board.height() {
        return Err(BlifsError::OutOfRange {
            x,
            y,
            width: board.width(),
            height: board.height(),
        });
    }
    Ok(())
}

/// Applies an offset to a coordinate with toroidal wraparound.
#[inline]
pub fn wrap(board: &Board, x: usize, y: usize, dx: i64, dy: i64) -> (usize, usize) {
    let w = board.width() as i64;
    let h = board.height() as i64;
    let nx = (x as i64 + dx).rem_euclid(w) as usize;
    let ny = (y as i64 + dy).rem_euclid(h) as usize;
    (nx, ny)
}

//! The toroidal live/dead grid.

use crate::error::{BlifsError, Result};

/// A fixed-size grid of live and dead cells.
///
/// Cells live in one contiguous buffer addressed row by row
/// (`index = y * width + x`). The live-cell counter is maintained on every
/// write and never recomputed by scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Number of columns (`x` range)
    width: usize,
    /// Number of rows (`y` range)
    height: usize,
    /// Cell states, `true` for alive
    cells: Vec<bool>,
    /// Number of cells currently alive
    live: u64,
}

impl Board {
    /// Creates a board of dead cells.
    ///
    /// # Errors
    ///
    /// Returns [`BlifsError::AllocationError`] if either dimension is zero,
    /// if `width * height` overflows, or if the grid cannot be allocated.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let alloc_error = || BlifsError::AllocationError { width, height };

        if width == 0 || height == 0 {
            return Err(alloc_error());
        }
        let area = width.checked_mul(height).ok_or_else(alloc_error)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(area).map_err(|_| alloc_error())?;
        cells.resize(area, false);

        Ok(Board {
            width,
            height,
            cells,
            live: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, `width * height`.
    pub fn area(&self) -> u64 {
        self.cells.len() as u64
    }

    /// Number of live cells, read from the maintained counter.
    pub fn live_count(&self) -> u64 {
        self.live
    }

    /// Returns whether the cell at `(x, y)` is alive.
    ///
    /// # Errors
    ///
    /// Returns [`BlifsError::OutOfRange`] for coordinates outside the board.
    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        let index = self.checked_index(x, y)?;
        Ok(self.cells[index])
    }

    /// Sets the cell at `(x, y)` and adjusts the live counter.
    ///
    /// Setting a cell to the state it already has leaves the counter alone.
    ///
    /// # Errors
    ///
    /// Returns [`BlifsError::OutOfRange`] for coordinates outside the board.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let index = self.checked_index(x, y)?;
        self.write(index, alive);
        Ok(())
    }

    /// Counts live cells by scanning the whole grid.
    ///
    /// Only useful to cross-check [`Board::live_count`].
    pub fn count_live_scan(&self) -> u64 {
        self.cells.iter().filter(|&&cell| cell).count() as u64
    }

    /// Iterates over the coordinates of live cells in column-major order
    /// (`x` outer, `y` inner).
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height)
                .filter(move |&y| self.cells[y * self.width + x])
                .map(move |y| (x, y))
        })
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Unchecked read for callers that already wrapped their coordinates.
    #[inline]
    pub(crate) fn alive_at(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub(crate) fn write(&mut self, index: usize, alive: bool) {
        let cell = &mut self.cells[index];
        match (*cell, alive) {
            (false, true) => self.live += 1,
            (true, false) => self.live -= 1,
            _ => {}
        }
        *cell = alive;
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(BlifsError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Overwrites cell states without touching the counter; the caller
    /// supplies the counter adjustment.
    pub(crate) fn cells_mut_with_live(&mut self) -> (&mut [bool], &mut u64) {
        (&mut self.cells, &mut self.live)
    }
}

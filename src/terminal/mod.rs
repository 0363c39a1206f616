//! Virtual terminal emulator module.
//!
//! Recordings store raw terminal output, so every frame is obtained by
//! replaying that output through a VTE-driven screen model and snapshotting
//! the resulting grid. The screen has a fixed shape for its whole lifetime.

mod grid;
mod performer;
mod sgr;
mod types;

#[cfg(test)]
mod tests;

pub use types::{Cell, CellStyle, Color};

use std::fmt;
use vte::Parser;

use grid::Grid;

/// A fixed-size virtual terminal screen.
///
/// Handles cursor movement, line wrapping, scroll regions, SGR colors and
/// DEC line drawing, which is what the game's curses output relies on.
pub struct Screen {
    grid: Grid,
    parser: Parser,
}

impl Screen {
    /// Create a blank screen with the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new(width, height),
            parser: Parser::new(),
        }
    }

    /// Feed raw output bytes through the emulator.
    ///
    /// Sequences split across calls are completed by the next call.
    pub fn process(&mut self, data: &[u8]) {
        self.parser.advance(&mut self.grid, data);
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Current cursor row (0-indexed).
    pub fn cursor_row(&self) -> usize {
        self.grid.cursor.row
    }

    /// Current cursor column (0-indexed). Equals the width right after the
    /// last column was written.
    pub fn cursor_col(&self) -> usize {
        self.grid.cursor.col
    }

    pub fn row(&self, row_idx: usize) -> Option<&[Cell]> {
        self.grid.rows().get(row_idx).map(Vec::as_slice)
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.rows().iter().flatten()
    }

    /// Copy the character grid into `out` (row-major, `height * width` bytes).
    pub fn write_chars(&self, out: &mut [u8]) {
        for (dst, cell) in out.iter_mut().zip(self.cells()) {
            *dst = cell.byte();
        }
    }

    /// Copy the palette-index grid into `out` (row-major, `height * width`).
    pub fn write_colors(&self, out: &mut [i8]) {
        for (dst, cell) in out.iter_mut().zip(self.cells()) {
            *dst = cell.style.palette_index();
        }
    }
}

impl fmt::Display for Screen {
    /// Display the current screen content as a string (without colors).
    ///
    /// Trailing whitespace is trimmed from each line and empty trailing lines
    /// are removed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self
            .grid
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.char)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();

        while lines.last().map(|s| s.is_empty()).unwrap_or(false) {
            lines.pop();
        }

        write!(f, "{}", lines.join("\n"))
    }
}

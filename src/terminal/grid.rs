//! Screen state that escape sequences act on.
//!
//! The grid never changes shape. Rows are scrolled by rotating slices of the
//! row vector inside the active scroll region, so a scroll of `n` lines costs
//! one rotation no matter how large `n` is.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use super::types::{Cell, CellStyle};

/// Zero-indexed cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// Character set designated into G0 or G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Charset {
    #[default]
    Ascii,
    /// DEC special graphics, used by games drawing with `DECgraphics`.
    LineDrawing,
}

impl Charset {
    /// Map a printed character through the charset.
    ///
    /// Line drawing glyphs become the plain characters the game would have
    /// drawn without `DECgraphics`, or their Latin-1 equivalents.
    fn translate(self, c: char) -> char {
        if self == Charset::Ascii {
            return c;
        }
        match c {
            'j' | 'k' | 'l' | 'm' | 'q' | 'v' | 'w' => '-',
            't' | 'u' | 'x' => '|',
            'n' => '+',
            'a' => '#',
            'f' => '\u{b0}',
            'g' => '\u{b1}',
            '}' => '\u{a3}',
            '~' => '\u{b7}',
            _ => c,
        }
    }
}

pub(crate) struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
    pub cursor: Cursor,
    saved: Option<Cursor>,
    /// Scroll region, inclusive on both ends.
    top: usize,
    bottom: usize,
    /// Style applied to newly printed cells.
    pub pen: CellStyle,
    charsets: [Charset; 2],
    /// SO selects G1, SI returns to G0.
    shifted: bool,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![Cell::default(); width]; height],
            width,
            cursor: Cursor::default(),
            saved: None,
            top: 0,
            bottom: height.saturating_sub(1),
            pen: CellStyle::default(),
            charsets: [Charset::default(); 2],
            shifted: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    fn last_row(&self) -> usize {
        self.height().saturating_sub(1)
    }

    fn last_col(&self) -> usize {
        self.width.saturating_sub(1)
    }

    fn in_region(&self) -> bool {
        (self.top..=self.bottom).contains(&self.cursor.row)
    }

    /// ESC c: blank screen, default pen, full-screen region, ASCII charsets.
    pub fn reset(&mut self) {
        let (width, height) = (self.width, self.height());
        *self = Self::new(width, height);
    }

    // -- printing ----------------------------------------------------------

    /// Print `c` at the cursor, wrapping to the next line when it does not fit.
    pub fn put(&mut self, c: char) {
        let c = self.charsets[usize::from(self.shifted)].translate(c);
        let span = match c.width() {
            Some(0) => return,
            Some(w) => w,
            None => 1,
        };

        if self.cursor.col + span > self.width {
            self.line_feed();
            self.cursor.col = 0;
        }
        let Cursor { row, col } = self.cursor;
        if row >= self.height() || col >= self.width {
            return;
        }

        let end = (col + span).min(self.width);
        let cells = &mut self.rows[row][col..end];
        cells[0] = Cell { char: c, style: self.pen };
        for pad in &mut cells[1..] {
            *pad = Cell { char: ' ', style: self.pen };
        }
        self.cursor.col = end;
    }

    pub fn designate(&mut self, slot: usize, charset: Charset) {
        if let Some(target) = self.charsets.get_mut(slot) {
            *target = charset;
        }
    }

    pub fn shift(&mut self, to_g1: bool) {
        self.shifted = to_g1;
    }

    // -- cursor ------------------------------------------------------------

    /// Move down a line, scrolling the region when the cursor sits on its
    /// bottom margin. The column is kept.
    pub fn line_feed(&mut self) {
        if self.cursor.row == self.bottom {
            self.scroll_up(1);
        } else if self.cursor.row < self.last_row() {
            self.cursor.row += 1;
        }
    }

    /// ESC M: move up, scrolling the region down from its top margin.
    pub fn reverse_index(&mut self) {
        if self.cursor.row == self.top {
            self.scroll_down(1);
        } else {
            self.cursor.row = self.cursor.row.saturating_sub(1);
        }
    }

    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
    }

    pub fn backspace(&mut self) {
        self.cursor.col = self.cursor.col.saturating_sub(1);
    }

    /// Advance to the next multiple of eight, stopping at the last column.
    pub fn tab(&mut self) {
        self.cursor.col = ((self.cursor.col / 8 + 1) * 8).min(self.last_col());
    }

    /// Relative move, clamped to the screen.
    pub fn shift_cursor(&mut self, rows: isize, cols: isize) {
        self.cursor.row = self.cursor.row.saturating_add_signed(rows).min(self.last_row());
        self.cursor.col = self.cursor.col.saturating_add_signed(cols).min(self.last_col());
    }

    /// Absolute move to zero-indexed coordinates, clamped to the screen.
    /// `None` keeps that coordinate.
    pub fn goto(&mut self, row: Option<usize>, col: Option<usize>) {
        if let Some(row) = row {
            self.cursor.row = row.min(self.last_row());
        }
        if let Some(col) = col {
            self.cursor.col = col.min(self.last_col());
        }
    }

    /// CSI s and ESC 7 share one slot.
    pub fn save_cursor(&mut self) {
        self.saved = Some(self.cursor);
    }

    /// Restoring with nothing saved leaves the cursor alone.
    pub fn restore_cursor(&mut self) {
        if let Some(saved) = self.saved {
            self.goto(Some(saved.row), Some(saved.col));
        }
    }

    // -- erasing -----------------------------------------------------------

    fn blank(&mut self, row: usize, cols: Range<usize>) {
        let end = cols.end.min(self.width);
        if let Some(line) = self.rows.get_mut(row) {
            if cols.start < end {
                line[cols.start..end].fill(Cell::default());
            }
        }
    }

    fn blank_rows(&mut self, rows: Range<usize>) {
        for row in rows {
            self.blank(row, 0..self.width);
        }
    }

    /// CSI J: 0 = cursor to end, 1 = start to cursor, 2/3 = whole screen.
    ///
    /// Erasing the whole screen also homes the cursor, which the game's
    /// clear-screen output relies on.
    pub fn erase_display(&mut self, mode: u16) {
        let Cursor { row, col } = self.cursor;
        match mode {
            0 => {
                self.blank(row, col..self.width);
                self.blank_rows(row + 1..self.height());
            }
            1 => {
                self.blank_rows(0..row);
                self.blank(row, 0..col + 1);
            }
            2 | 3 => {
                self.blank_rows(0..self.height());
                self.cursor = Cursor::default();
            }
            _ => {}
        }
    }

    /// CSI K: 0 = cursor to end of line, 1 = start to cursor, 2 = whole line.
    pub fn erase_line(&mut self, mode: u16) {
        let Cursor { row, col } = self.cursor;
        match mode {
            0 => self.blank(row, col..self.width),
            1 => self.blank(row, 0..col + 1),
            2 => self.blank(row, 0..self.width),
            _ => {}
        }
    }

    /// CSI X: blank `n` cells from the cursor without moving it.
    pub fn erase_chars(&mut self, n: usize) {
        let Cursor { row, col } = self.cursor;
        self.blank(row, col..col.saturating_add(n));
    }

    // -- shifting cells and rows -------------------------------------------

    /// CSI P: delete `n` cells at the cursor, pulling the rest of the line left.
    pub fn delete_chars(&mut self, n: usize) {
        let Cursor { row, col } = self.cursor;
        if let Some(tail) = self.rows.get_mut(row).and_then(|r| r.get_mut(col..)) {
            let n = n.min(tail.len());
            tail.rotate_left(n);
            let keep = tail.len() - n;
            tail[keep..].fill(Cell::default());
        }
    }

    /// CSI @: insert `n` blank cells at the cursor, pushing the line right.
    pub fn insert_chars(&mut self, n: usize) {
        let Cursor { row, col } = self.cursor;
        if let Some(tail) = self.rows.get_mut(row).and_then(|r| r.get_mut(col..)) {
            let n = n.min(tail.len());
            tail.rotate_right(n);
            tail[..n].fill(Cell::default());
        }
    }

    /// Rotate `span` by `n` rows and blank the rows that wrapped around.
    fn roll(&mut self, span: Range<usize>, n: usize, up: bool) {
        let blank = vec![Cell::default(); self.width];
        let Some(rows) = self.rows.get_mut(span) else {
            return;
        };
        let n = n.min(rows.len());
        if up {
            rows.rotate_left(n);
            let keep = rows.len() - n;
            rows[keep..].fill(blank);
        } else {
            rows.rotate_right(n);
            rows[..n].fill(blank);
        }
    }

    /// CSI S and line feeds at the bottom margin.
    pub fn scroll_up(&mut self, n: usize) {
        self.roll(self.top..self.bottom + 1, n, true);
    }

    /// CSI T and reverse index at the top margin.
    pub fn scroll_down(&mut self, n: usize) {
        self.roll(self.top..self.bottom + 1, n, false);
    }

    /// CSI M: delete lines at the cursor. Outside the region it does nothing.
    pub fn delete_lines(&mut self, n: usize) {
        if self.in_region() {
            self.roll(self.cursor.row..self.bottom + 1, n, true);
        }
    }

    /// CSI L: insert blank lines at the cursor. Outside the region it does nothing.
    pub fn insert_lines(&mut self, n: usize) {
        if self.in_region() {
            self.roll(self.cursor.row..self.bottom + 1, n, false);
        }
    }

    /// DECSTBM with one-indexed margins. An empty or inverted region is
    /// ignored; a valid one homes the cursor.
    pub fn set_margins(&mut self, top: usize, bottom: usize) {
        let top = top.saturating_sub(1);
        let bottom = bottom.saturating_sub(1).min(self.last_row());
        if top < bottom {
            self.top = top;
            self.bottom = bottom;
            self.cursor = Cursor::default();
        }
    }
}

//! Frame buffers and frame types.
//!
//! [`FrameBatch`] holds `capacity` frames in flat, preallocated arrays that the
//! decoder overwrites on every call. [`FrameView`] borrows one slot of a batch
//! and is only valid until the next decode; [`Frame`] is the owned copy.

use super::TerminalShape;

/// Preallocated, reusable storage for a batch of decoded frames.
#[derive(Debug, Clone)]
pub struct FrameBatch {
    shape: TerminalShape,
    capacity: usize,
    len: usize,
    pub(crate) chars: Vec<u8>,
    pub(crate) colors: Vec<i8>,
    pub(crate) cursors: Vec<(i16, i16)>,
    pub(crate) timestamps: Vec<i64>,
    pub(crate) actions: Vec<u8>,
    pub(crate) scores: Vec<i32>,
}

impl FrameBatch {
    pub fn new(capacity: usize, shape: TerminalShape) -> Self {
        let cells = capacity * shape.cells();
        Self {
            shape,
            capacity,
            len: 0,
            chars: vec![0; cells],
            colors: vec![0; cells],
            cursors: vec![(0, 0); capacity],
            timestamps: vec![0; capacity],
            actions: vec![0; capacity],
            scores: vec![0; capacity],
        }
    }

    pub fn shape(&self) -> TerminalShape {
        self.shape
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots filled by the last decode.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        self.len = len.min(self.capacity);
    }

    /// Cell range of slot `index` in the flat grids.
    pub(crate) fn cells(&self, index: usize) -> std::ops::Range<usize> {
        let n = self.shape.cells();
        index * n..(index + 1) * n
    }

    /// Borrow a filled slot.
    pub fn view(&self, index: usize) -> Option<FrameView<'_>> {
        if index >= self.len {
            return None;
        }
        let cells = self.cells(index);
        Some(FrameView {
            shape: self.shape,
            chars: &self.chars[cells.clone()],
            colors: &self.colors[cells],
            cursor: self.cursors[index],
            timestamp: self.timestamps[index],
            action: self.actions[index],
            score: self.scores[index],
        })
    }

    /// Iterate over the filled slots.
    pub fn iter(&self) -> impl Iterator<Item = FrameView<'_>> {
        (0..self.len).filter_map(move |i| self.view(i))
    }
}

/// A read-only view of one decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    pub shape: TerminalShape,
    pub chars: &'a [u8],
    pub colors: &'a [i8],
    /// (row, column)
    pub cursor: (i16, i16),
    /// Microseconds since the epoch.
    pub timestamp: i64,
    pub action: u8,
    pub score: i32,
}

impl<'a> FrameView<'a> {
    /// Raw bytes of one row.
    pub fn row(&self, row: usize) -> &'a [u8] {
        let cols = self.shape.columns;
        &self.chars[row * cols..(row + 1) * cols]
    }

    /// Palette indices of one row.
    pub fn color_row(&self, row: usize) -> &'a [i8] {
        let cols = self.shape.columns;
        &self.colors[row * cols..(row + 1) * cols]
    }

    /// Decode every row as Latin-1 text, full width.
    ///
    /// Pure function of the buffer: calling it twice without an intervening
    /// decode yields identical output.
    pub fn lines(&self) -> Vec<String> {
        (0..self.shape.rows)
            .map(|r| latin1(self.row(r)))
            .collect()
    }

    /// The screen as text with trailing blanks removed.
    pub fn text(&self) -> String {
        let mut lines: Vec<String> = self
            .lines()
            .into_iter()
            .map(|l| l.trim_end().to_string())
            .collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    /// Copy the view into an owned frame.
    pub fn to_frame(&self) -> Frame {
        Frame {
            shape: self.shape,
            chars: self.chars.to_vec(),
            colors: self.colors.to_vec(),
            cursor: self.cursor,
            timestamp: self.timestamp,
            action: self.action,
            score: self.score,
        }
    }
}

/// An owned frame, detached from the decoder's buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub shape: TerminalShape,
    pub chars: Vec<u8>,
    pub colors: Vec<i8>,
    pub cursor: (i16, i16),
    pub timestamp: i64,
    pub action: u8,
    pub score: i32,
}

impl Frame {
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            shape: self.shape,
            chars: &self.chars,
            colors: &self.colors,
            cursor: self.cursor,
            timestamp: self.timestamp,
            action: self.action,
            score: self.score,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.view().lines()
    }

    pub fn text(&self) -> String {
        self.view().text()
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

//! Batch frame decoder.

use tracing::debug;

use super::frame::FrameBatch;
use super::record::{index_frames, FrameRecord};
use super::{TerminalShape, TtyrecVersion};
use crate::error::{ReplayError, Result};
use crate::terminal::Screen;

/// Outcome of one [`FrameDecoder::decode_next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeProgress {
    /// Slots of the batch that now hold frames.
    pub filled: usize,
    /// Frames still unread after this call. Zero means end of stream.
    pub remaining: usize,
}

impl DecodeProgress {
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

/// Decodes an in-memory recording into batches of frames.
///
/// The output bytes of every frame are replayed through a [`Screen`] whose
/// grid is then copied into the caller's [`FrameBatch`]. The screen persists
/// across calls, so frames build on each other exactly as they did on the
/// recording terminal.
pub struct FrameDecoder {
    data: Vec<u8>,
    version: TtyrecVersion,
    shape: TerminalShape,
    screen: Screen,
    index: Option<Vec<FrameRecord>>,
    position: usize,
}

impl FrameDecoder {
    pub fn new(data: Vec<u8>, version: TtyrecVersion, shape: TerminalShape) -> Self {
        Self {
            data,
            version,
            shape,
            screen: Screen::new(shape.columns, shape.rows),
            index: None,
            position: 0,
        }
    }

    pub fn version(&self) -> TtyrecVersion {
        self.version
    }

    pub fn shape(&self) -> TerminalShape {
        self.shape
    }

    /// Frames decoded so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total frames in the stream, once indexed.
    pub fn total_frames(&self) -> Option<usize> {
        self.index.as_ref().map(Vec::len)
    }

    /// Fill `batch` with up to `batch.capacity()` frames.
    ///
    /// Slots are overwritten from index 0; `batch.len()` is set to the number
    /// filled. An exhausted stream returns `(0, 0)` and leaves the batch
    /// contents untouched apart from its length.
    pub fn decode_next(&mut self, batch: &mut FrameBatch) -> Result<DecodeProgress> {
        if batch.shape() != self.shape {
            return Err(ReplayError::ShapeMismatch {
                expected: self.shape,
                found: batch.shape(),
            });
        }

        if self.index.is_none() {
            self.index = Some(index_frames(&self.data, self.version)?);
        }
        let Some(index) = self.index.as_ref() else {
            return Ok(DecodeProgress {
                filled: 0,
                remaining: 0,
            });
        };

        let end = (self.position + batch.capacity()).min(index.len());
        let records = &index[self.position..end];
        for (slot, record) in records.iter().enumerate() {
            self.screen.process(&self.data[record.payload.clone()]);

            let cells = batch.cells(slot);
            self.screen.write_chars(&mut batch.chars[cells.clone()]);
            self.screen.write_colors(&mut batch.colors[cells]);
            // a pending wrap leaves the emulator cursor one past the last column
            let col = self.screen.cursor_col().min(self.shape.columns.saturating_sub(1));
            batch.cursors[slot] = (clamp_i16(self.screen.cursor_row()), clamp_i16(col));
            batch.timestamps[slot] = record.timestamp;
            batch.actions[slot] = record.action;
            batch.scores[slot] = record.score;
        }

        let filled = records.len();
        self.position = end;
        batch.set_len(filled);

        let remaining = index.len() - self.position;
        debug!(filled, remaining, "decoded batch");
        Ok(DecodeProgress { filled, remaining })
    }
}

fn clamp_i16(n: usize) -> i16 {
    i16::try_from(n).unwrap_or(i16::MAX)
}

//! Message/screen alignment.
//!
//! The game keeps the current message in a separate buffer, but on screen the
//! message may wrap across several rows and be followed by a popup. Aligning
//! the two finds how many rows belong to the message. Wrapping changes spaces
//! and punctuation (a `#` at the start of a wrapped row, a dropped trailing
//! `.`), so rows are compared on their alphanumeric characters only.

use serde::Serialize;
use tracing::trace;

use super::marker::Marker;
use super::take_chars;
use crate::error::{ReplayError, Result};

/// How an alignment was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPath {
    /// The accumulated rows matched the message.
    Aligned,
    /// No row matched, but the marker is on row 0, where the game fuses the
    /// message with the text in front of the marker.
    RowZeroFusion,
}

/// Result of [`MessageAligner::align`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alignment {
    /// Rows occupied by the message, counted from the top.
    pub rows: usize,
    pub path: AlignmentPath,
}

/// Aligns a message buffer against the rows above a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageAligner {
    row_zero_fusion: bool,
}

impl Default for MessageAligner {
    fn default() -> Self {
        Self {
            row_zero_fusion: true,
        }
    }
}

impl MessageAligner {
    pub fn new(row_zero_fusion: bool) -> Self {
        Self { row_zero_fusion }
    }

    /// An aligner that never takes the row-0 fusion path.
    pub fn strict() -> Self {
        Self::new(false)
    }

    pub fn row_zero_fusion(&self) -> bool {
        self.row_zero_fusion
    }

    /// Count the rows, from the top down to the marker row, that hold
    /// `message`.
    ///
    /// The marker row only contributes the text before the marker. A message
    /// without alphanumeric characters occupies no rows.
    pub fn align<S: AsRef<str>>(
        &self,
        message: &str,
        lines: &[S],
        marker: &Marker,
    ) -> Result<Alignment> {
        let target = alnum(message);
        let mut prefix = String::new();

        if alnum(&prefix) == target {
            return Ok(Alignment {
                rows: 0,
                path: AlignmentPath::Aligned,
            });
        }

        for (row, line) in lines.iter().take(marker.row + 1).enumerate() {
            let line = line.as_ref();
            let line = if row == marker.row {
                take_chars(line, marker.col)
            } else {
                line
            };
            prefix.push_str(line.trim());
            if alnum(&prefix) == target {
                return Ok(Alignment {
                    rows: row + 1,
                    path: AlignmentPath::Aligned,
                });
            }
        }

        if marker.row == 0 && self.row_zero_fusion {
            trace!(message, screen = %prefix, "aligned through row-0 fusion");
            return Ok(Alignment {
                rows: 1,
                path: AlignmentPath::RowZeroFusion,
            });
        }

        Err(ReplayError::MessageScreenMismatch {
            message: message.to_string(),
            screen: prefix,
        })
    }
}

fn alnum(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}

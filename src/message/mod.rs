//! Message, popup and marker recovery from a terminal grid.
//!
//! Every frame is split into three parts:
//!
//! ```text
//! row 0   You see here a scroll labeled FOOBIE BLETCH.--More--   <- message + marker
//! ```
//! ```text
//! row 0                        Weapons                           <- popup
//! row 1                        a - a long sword (weapon in hand)
//! row 2                        (end)                             <- marker
//! ```
//!
//! [`MarkerScanner`] finds the marker, [`MessageAligner`] finds where the
//! message ends, and [`PopupExtractor`] collects what lies between the two.
//! A [`MessageState`] is rebuilt from scratch for every frame.

mod advance;
mod align;
mod marker;
mod popup;

pub use advance::{Advance, AdvanceState, PaginationAdvancer, CONTINUE_KEY};
pub use align::{Alignment, AlignmentPath, MessageAligner};
pub use marker::{Marker, MarkerKind, MarkerScanner};
pub use popup::PopupExtractor;

use serde::Serialize;

use crate::error::Result;

/// The semantic content of one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageState {
    pub message: String,
    /// Non-empty popup lines, top to bottom.
    pub popup: Vec<String>,
    pub marker: Option<Marker>,
}

impl MessageState {
    /// Split a screen into message, popup and marker.
    ///
    /// Without a marker the whole screen is treated as message-only.
    pub fn parse<S: AsRef<str>>(
        message: &str,
        lines: &[S],
        aligner: &MessageAligner,
    ) -> Result<Self> {
        let Some(marker) = MarkerScanner::scan(lines)? else {
            return Ok(Self {
                message: message.to_string(),
                popup: Vec::new(),
                marker: None,
            });
        };

        let alignment = aligner.align(message, lines, &marker)?;
        let popup = PopupExtractor::extract(lines, alignment.rows, marker.row, marker.col);
        Ok(Self {
            message: message.to_string(),
            popup,
            marker: Some(marker),
        })
    }

    /// Message, popup lines and marker text joined by line breaks.
    pub fn text(&self) -> String {
        self.join(true)
    }

    /// The text this screen contributes to a paginated message: a
    /// `--More--` marker is left out, other markers stay.
    pub fn segment(&self) -> String {
        self.join(false)
    }

    pub fn has_continue(&self) -> bool {
        self.marker.is_some_and(|m| m.is_continue())
    }

    fn join(&self, with_continue: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.popup.len() + 2);
        if !self.message.is_empty() {
            parts.push(self.message.clone());
        }
        parts.extend(self.popup.iter().cloned());
        if let Some(marker) = self.marker {
            if with_continue || !marker.is_continue() {
                parts.push(marker.kind.to_string());
            }
        }
        parts.join("\n")
    }
}

/// Derive a message buffer from the screen.
///
/// Recordings do not store the game's message buffer, so replay reads it off
/// the screen. Normally that is the top row, cut at the marker column when
/// there is a marker (on that row, or below it with a popup starting at that
/// column).
///
/// A message too long for one row wraps, and its `--More--` then lands on a
/// later row. That shows as every row down to the marker starting at column
/// 0, which map and popup rows never do. The message is then rows
/// `0..=marker.row`, with the marker row cut at the marker and the `#` the
/// game puts in front of a continuation row dropped.
///
/// NULs become spaces and a trailing `--More--` is removed either way.
pub fn screen_message<S: AsRef<str>>(lines: &[S], marker: Option<&Marker>) -> String {
    let Some(top) = lines.first().map(|l| l.as_ref()) else {
        return String::new();
    };
    let Some(marker) = marker else {
        return normalize_message(top);
    };
    if !wraps_to_marker(lines, marker) {
        return normalize_message(take_chars(top, marker.col));
    }

    let rows = lines[..=marker.row].iter().enumerate().map(|(row, line)| {
        let line = line.as_ref();
        let line = if row == marker.row {
            take_chars(line, marker.col)
        } else {
            line
        };
        let line = line.trim();
        if row > 0 {
            line.strip_prefix('#').unwrap_or(line)
        } else {
            line
        }
    });
    normalize_message(&rows.collect::<Vec<_>>().join(" "))
}

/// Whether a `--More--` below row 0 ends a message wrapped over all rows
/// above it.
fn wraps_to_marker<S: AsRef<str>>(lines: &[S], marker: &Marker) -> bool {
    marker.is_continue()
        && marker.row > 0
        && marker.col > 0
        && marker.row < lines.len()
        && lines[..=marker.row]
            .iter()
            .all(|line| line.as_ref().chars().next().is_some_and(|c| !c.is_whitespace()))
}

/// Clean a raw message buffer: NULs become spaces, line breaks are dropped,
/// surrounding blanks and a trailing `--More--` are removed.
pub fn normalize_message(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|&c| c != '\n' && c != '\r')
        .map(|c| if c == '\0' { ' ' } else { c })
        .collect();
    let trimmed = cleaned.trim();
    trimmed
        .strip_suffix("--More--")
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}

/// The first `n` characters of `s`.
pub(crate) fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// `s` without its first `n` characters.
pub(crate) fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[i..],
        None => "",
    }
}

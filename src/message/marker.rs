//! Pagination marker detection.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{ReplayError, Result};

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--More--|\(end\)|\((\d+) of (\d+)\)").expect("static regex")
});

/// The kind of pagination marker found on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    /// `--More--`: the game waits for a keypress before showing the rest.
    Continue,
    /// `(end)`: last page of a menu.
    End,
    /// `(i of n)`: page `index` of a `total`-page menu.
    Page { index: u32, total: u32 },
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Continue => f.write_str("--More--"),
            MarkerKind::End => f.write_str("(end)"),
            MarkerKind::Page { index, total } => write!(f, "({} of {})", index, total),
        }
    }
}

/// A marker and where it sits on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Marker {
    #[serde(flatten)]
    pub kind: MarkerKind,
    pub row: usize,
    /// Character column, normalized (see [`MarkerScanner::scan`]).
    pub col: usize,
}

impl Marker {
    pub fn is_continue(&self) -> bool {
        self.kind == MarkerKind::Continue
    }
}

/// Finds the pagination marker on a screen.
pub struct MarkerScanner;

impl MarkerScanner {
    /// Scan every row for a marker.
    ///
    /// A screen holds at most one marker; more than one match fails with
    /// `MultipleMarkers`. Menus drawn from column 1 put their marker there, so
    /// a match at column 1 is reported at column 0.
    pub fn scan<S: AsRef<str>>(lines: &[S]) -> Result<Option<Marker>> {
        let mut found = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            for caps in MARKER.captures_iter(line) {
                let Some(m) = caps.get(0) else { continue };
                let kind = match (caps.get(1), caps.get(2)) {
                    (Some(i), Some(n)) => MarkerKind::Page {
                        index: i.as_str().parse().unwrap_or(u32::MAX),
                        total: n.as_str().parse().unwrap_or(u32::MAX),
                    },
                    _ if m.as_str() == "(end)" => MarkerKind::End,
                    _ => MarkerKind::Continue,
                };
                let col = line[..m.start()].chars().count();
                found.push((row, col, kind));
            }
        }

        match found.as_slice() {
            [] => Ok(None),
            [(row, col, kind)] => Ok(Some(Marker {
                kind: *kind,
                row: *row,
                col: if *col == 1 { 0 } else { *col },
            })),
            _ => Err(ReplayError::MultipleMarkers { found }),
        }
    }
}

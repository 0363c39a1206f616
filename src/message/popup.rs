//! Popup extraction.

use super::{skip_chars, take_chars};

/// Cuts the popup out of the rows between the message and the marker.
pub struct PopupExtractor;

impl PopupExtractor {
    /// Collect the popup lines of a screen.
    ///
    /// Takes the rows from `boundary` up to the marker row, plus the marker
    /// row cut at `marker_col`. Popups are left-aligned with their marker, so
    /// each row loses its first `marker_col` characters. Rows that are blank
    /// after trimming are dropped.
    pub fn extract<S: AsRef<str>>(
        lines: &[S],
        boundary: usize,
        marker_row: usize,
        marker_col: usize,
    ) -> Vec<String> {
        let body = lines
            .get(boundary.min(marker_row)..marker_row)
            .unwrap_or_default()
            .iter()
            .map(|l| l.as_ref());
        let marker_line = lines
            .get(marker_row)
            .map(|l| take_chars(l.as_ref(), marker_col));

        body.chain(marker_line)
            .map(|line| skip_chars(line, marker_col).trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

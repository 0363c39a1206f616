//! Errors surfaced by the decoding and message-parsing core.
//!
//! Every variant carries enough context to diagnose the failure without a
//! debugger: paths, versions, byte offsets, or the message/screen pair that
//! failed to align. Nothing here is retried internally; the batch renderer is
//! the only caller that turns a per-file failure into skip-and-log.

use std::path::PathBuf;

use crate::message::MarkerKind;
use crate::ttyrec::TerminalShape;

/// Result alias used throughout the library.
pub type Result<T, E = ReplayError> = std::result::Result<T, E>;

/// Errors produced while opening, decoding or interpreting a recording.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("ttyrec version mismatch: declared v{declared}, but {source_desc} says v{found}")]
    VersionMismatch {
        declared: u8,
        found: u8,
        source_desc: String,
    },

    #[error("not a ttyrec recording: {path} ({reason})")]
    NotARecording { path: PathBuf, reason: String },

    #[error("corrupt recording at byte {offset}: {detail}")]
    CorruptRecording { offset: usize, detail: String },

    #[error("frame buffer shape {found} does not match session shape {expected}")]
    ShapeMismatch {
        expected: TerminalShape,
        found: TerminalShape,
    },

    #[error("found {} markers on one screen ({})", .found.len(), describe_markers(.found))]
    MultipleMarkers { found: Vec<(usize, usize, MarkerKind)> },

    #[error("message does not align with screen: message {message:?}, screen prefix {screen:?}")]
    MessageScreenMismatch { message: String, screen: String },

    #[error("missing asset: {path} ({what})")]
    MissingAsset { path: PathBuf, what: String },

    #[error("environment '{name}' is not registered (known: {})", .known.join(", "))]
    UnknownEnvironment { name: String, known: Vec<String> },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReplayError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReplayError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the batch renderer may skip this input and keep going.
    ///
    /// Inputs that are not recordings, or are recordings of another version
    /// than the one requested, are skipped. Damaged recordings are not.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ReplayError::NotARecording { .. } | ReplayError::VersionMismatch { .. }
        )
    }
}

fn describe_markers(found: &[(usize, usize, MarkerKind)]) -> String {
    found
        .iter()
        .map(|(row, col, kind)| format!("{} at {}:{}", kind, row, col))
        .collect::<Vec<_>>()
        .join(", ")
}

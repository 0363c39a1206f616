//! ttyrec recording support.
//!
//! A ttyrec is a stream of timestamped records of raw terminal output. The
//! game's recorder extends the plain format with a channel byte (version 2)
//! and score records (version 3):
//!
//! ```text
//! v1: [sec u32][usec u32][len u32] payload
//! v2: [sec u32][usec u32][len u32][channel u8] payload   channel 0 = output, 1 = input
//! v3: same as v2, plus channel 2 = score (i32 payload)
//! ```
//!
//! All integers are little-endian. Files may be bzip2- or gzip-compressed as
//! a whole. The version is not stored in the stream; it is inferred from the
//! file name (`*.ttyrec`, `*.ttyrec2`, `*.ttyrec3`, optionally followed by a
//! compression suffix).
//!
//! # Structure
//!
//! - `record` - record headers and the frame index built from them
//! - `source` - reading and decompressing recordings from disk
//! - `frame` - reusable frame buffers and borrowed/owned frame types
//! - `decoder` - batch decoding of frames through the screen emulator
//! - `session` - one open recording exposed as a lazy frame sequence
//! - `writer` - writing recordings (fixtures, re-encoding)

mod decoder;
mod frame;
mod record;
mod session;
mod source;
mod writer;

pub use decoder::{DecodeProgress, FrameDecoder};
pub use frame::{Frame, FrameBatch, FrameView};
pub use session::{Frames, ReplayOptions, ReplaySession};
pub use source::read_recording;
pub use writer::TtyrecWriter;

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default terminal height of recorded games.
pub const ROWS: usize = 25;
/// Default terminal width of recorded games.
pub const COLUMNS: usize = 80;
/// Default number of frames decoded per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ttyrec(\d*)").expect("static regex"));

/// Recording format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TtyrecVersion {
    V1,
    V2,
    V3,
}

impl TtyrecVersion {
    pub fn number(self) -> u8 {
        match self {
            TtyrecVersion::V1 => 1,
            TtyrecVersion::V2 => 2,
            TtyrecVersion::V3 => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(TtyrecVersion::V1),
            2 => Some(TtyrecVersion::V2),
            3 => Some(TtyrecVersion::V3),
            _ => None,
        }
    }

    /// Whether record headers carry a channel byte.
    pub fn has_channels(self) -> bool {
        self != TtyrecVersion::V1
    }

    /// Size of a record header in bytes.
    pub fn header_len(self) -> usize {
        if self.has_channels() {
            13
        } else {
            12
        }
    }
}

impl TryFrom<u8> for TtyrecVersion {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        TtyrecVersion::from_number(n).ok_or_else(|| format!("unsupported ttyrec version {}", n))
    }
}

impl From<TtyrecVersion> for u8 {
    fn from(v: TtyrecVersion) -> u8 {
        v.number()
    }
}

impl fmt::Display for TtyrecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Fixed terminal dimensions of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalShape {
    pub rows: usize,
    pub columns: usize,
}

impl TerminalShape {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Number of cells in one grid.
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for TerminalShape {
    fn default() -> Self {
        Self::new(ROWS, COLUMNS)
    }
}

impl fmt::Display for TerminalShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Infer the version number encoded in a recording's file name.
///
/// `ttyrec` with no digits is version 1. Returns `None` when the name has no
/// `ttyrec` token at all. The number is returned as written, so callers can
/// report unsupported versions.
pub fn version_from_filename(name: &str) -> Option<u32> {
    let caps = VERSION_TOKEN.captures(name)?;
    let digits = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    if digits.is_empty() {
        Some(1)
    } else {
        digits.parse().ok()
    }
}

/// Whether a path looks like a recording at all.
pub fn is_recording_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(version_from_filename)
        .and_then(|v| u8::try_from(v).ok())
        .and_then(TtyrecVersion::from_number)
        .is_some()
}

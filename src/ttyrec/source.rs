//! Reading recordings from disk.
//!
//! Recordings are small enough (a few MB decompressed) to hold in memory,
//! which lets the decoder index the whole stream before the first frame.

use std::fs;
use std::io::Read;
use std::path::Path;

use bzip2::read::MultiBzDecoder;
use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{ReplayError, Result};

const BZIP2_MAGIC: &[u8] = b"BZh";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Read a recording file, transparently decompressing bzip2 and gzip.
pub fn read_recording(path: &Path) -> Result<Vec<u8>> {
    let raw = fs::read(path).map_err(|e| ReplayError::io(path, e))?;
    let data = decompress(raw).map_err(|e| ReplayError::io(path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "loaded recording");
    Ok(data)
}

/// Decompress `raw` if it starts with a known magic number.
fn decompress(raw: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    if raw.starts_with(BZIP2_MAGIC) {
        MultiBzDecoder::new(raw.as_slice()).read_to_end(&mut out)?;
    } else if raw.starts_with(GZIP_MAGIC) {
        GzDecoder::new(raw.as_slice()).read_to_end(&mut out)?;
    } else {
        return Ok(raw);
    }
    Ok(out)
}

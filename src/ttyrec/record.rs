//! Record headers and the frame index.
//!
//! The decoder walks every record header once up front. That pass validates
//! the stream against the declared version and yields one [`FrameRecord`] per
//! output record, which is what makes `frames_remaining` exact.

use std::ops::Range;

use tracing::debug;

use super::TtyrecVersion;
use crate::error::{ReplayError, Result};

/// Record channel (versions 2 and 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    Output,
    Input,
    Score,
}

impl Channel {
    pub(crate) fn code(self) -> u8 {
        match self {
            Channel::Output => 0,
            Channel::Input => 1,
            Channel::Score => 2,
        }
    }
}

/// A parsed record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordHeader {
    pub sec: u32,
    pub usec: u32,
    pub len: u32,
    pub channel: Channel,
}

impl RecordHeader {
    /// Microseconds since the epoch.
    pub fn timestamp(&self) -> i64 {
        i64::from(self.sec) * 1_000_000 + i64::from(self.usec)
    }

    /// Parse the header at `offset`.
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    fn parse(data: &[u8], offset: usize, version: TtyrecVersion) -> Result<Option<Self>> {
        let rest = &data[offset..];
        if rest.is_empty() {
            return Ok(None);
        }
        let header_len = version.header_len();
        if rest.len() < header_len {
            return Err(ReplayError::CorruptRecording {
                offset,
                detail: format!(
                    "truncated header ({} of {} bytes)",
                    rest.len(),
                    header_len
                ),
            });
        }

        let sec = read_u32_le(&rest[0..4]);
        let usec = read_u32_le(&rest[4..8]);
        let len = read_u32_le(&rest[8..12]);
        let channel = if version.has_channels() {
            match rest[12] {
                0 => Channel::Output,
                1 => Channel::Input,
                2 if version == TtyrecVersion::V3 => Channel::Score,
                2 => {
                    return Err(ReplayError::VersionMismatch {
                        declared: version.number(),
                        found: 3,
                        source_desc: format!("score record at byte {}", offset),
                    })
                }
                other => {
                    return Err(ReplayError::CorruptRecording {
                        offset,
                        detail: format!("unknown channel {}", other),
                    })
                }
            }
        } else {
            Channel::Output
        };

        Ok(Some(RecordHeader {
            sec,
            usec,
            len,
            channel,
        }))
    }
}

/// Where one frame's output lives and the metadata attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FrameRecord {
    pub payload: Range<usize>,
    pub timestamp: i64,
    pub action: u8,
    pub score: i32,
}

/// Walk every record and build the frame index.
///
/// Each output record becomes a frame. The first input record after an output
/// record supplies that frame's action; score records update the score seen by
/// subsequent frames. Timestamps are clamped so they never go backwards.
pub(crate) fn index_frames(data: &[u8], version: TtyrecVersion) -> Result<Vec<FrameRecord>> {
    let mut frames: Vec<FrameRecord> = Vec::new();
    let mut offset = 0;
    let mut score = 0i32;
    let mut last_timestamp = i64::MIN;
    let mut awaiting_action: Option<usize> = None;

    while let Some(header) = RecordHeader::parse(data, offset, version)? {
        let start = offset + version.header_len();
        let end = start + header.len as usize;
        if end > data.len() {
            return Err(ReplayError::CorruptRecording {
                offset,
                detail: format!(
                    "payload of {} bytes runs past end of stream ({} bytes left)",
                    header.len,
                    data.len() - start
                ),
            });
        }

        match header.channel {
            Channel::Output => {
                let timestamp = header.timestamp().max(last_timestamp);
                last_timestamp = timestamp;
                awaiting_action = Some(frames.len());
                frames.push(FrameRecord {
                    payload: start..end,
                    timestamp,
                    action: 0,
                    score,
                });
            }
            Channel::Input => {
                if let (Some(idx), Some(&key)) = (awaiting_action.take(), data[start..end].first())
                {
                    frames[idx].action = key;
                }
            }
            Channel::Score => {
                let bytes: [u8; 4] =
                    data[start..end]
                        .try_into()
                        .map_err(|_| ReplayError::CorruptRecording {
                            offset,
                            detail: format!("score record has {} bytes, expected 4", header.len),
                        })?;
                score = i32::from_le_bytes(bytes);
            }
        }

        offset = end;
    }

    debug!(frames = frames.len(), bytes = data.len(), %version, "indexed recording");
    Ok(frames)
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

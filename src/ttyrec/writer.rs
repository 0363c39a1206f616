//! Writing recordings.

use std::io::{self, Write};

use super::record::Channel;
use super::TtyrecVersion;

/// Writes ttyrec records of a fixed version to any [`Write`] sink.
///
/// ```
/// use ttyr::ttyrec::{TtyrecVersion, TtyrecWriter};
///
/// let mut writer = TtyrecWriter::new(Vec::new(), TtyrecVersion::V3);
/// writer.output(1, 0, b"Hello").unwrap();
/// writer.input(1, 10, b'k').unwrap();
/// writer.score(1, 20, 10).unwrap();
/// assert_eq!(writer.into_inner().len(), 13 + 5 + 13 + 1 + 13 + 4);
/// ```
pub struct TtyrecWriter<W: Write> {
    inner: W,
    version: TtyrecVersion,
}

impl<W: Write> TtyrecWriter<W> {
    pub fn new(inner: W, version: TtyrecVersion) -> Self {
        Self { inner, version }
    }

    pub fn version(&self) -> TtyrecVersion {
        self.version
    }

    /// Append a terminal output record.
    pub fn output(&mut self, sec: u32, usec: u32, payload: &[u8]) -> io::Result<()> {
        self.record(sec, usec, Channel::Output, payload)
    }

    /// Append an input record carrying one key code.
    pub fn input(&mut self, sec: u32, usec: u32, key: u8) -> io::Result<()> {
        self.record(sec, usec, Channel::Input, &[key])
    }

    /// Append a score update.
    pub fn score(&mut self, sec: u32, usec: u32, score: i32) -> io::Result<()> {
        self.record(sec, usec, Channel::Score, &score.to_le_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn record(&mut self, sec: u32, usec: u32, channel: Channel, payload: &[u8]) -> io::Result<()> {
        let supported = match channel {
            Channel::Output => true,
            Channel::Input => self.version.has_channels(),
            Channel::Score => self.version == TtyrecVersion::V3,
        };
        if !supported {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "ttyrec {} cannot store {:?} records",
                    self.version, channel
                ),
            ));
        }
        let len = u32::try_from(payload.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "record payload exceeds 4 GiB")
        })?;

        self.inner.write_all(&sec.to_le_bytes())?;
        self.inner.write_all(&usec.to_le_bytes())?;
        self.inner.write_all(&len.to_le_bytes())?;
        if self.version.has_channels() {
            self.inner.write_all(&[channel.code()])?;
        }
        self.inner.write_all(payload)
    }
}

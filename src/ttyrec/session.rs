//! One open recording as a lazy frame sequence.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::decoder::FrameDecoder;
use super::frame::{Frame, FrameBatch, FrameView};
use super::source::read_recording;
use super::{version_from_filename, TerminalShape, TtyrecVersion, DEFAULT_BATCH_SIZE};
use crate::error::{ReplayError, Result};

/// How a recording is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Declared version. `None` trusts the file name.
    pub version: Option<TtyrecVersion>,
    pub shape: TerminalShape,
    /// Frames decoded per refill of the working buffer.
    pub batch_size: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            version: Some(TtyrecVersion::V3),
            shape: TerminalShape::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ReplayOptions {
    /// Options that take the version from the file name.
    pub fn inferred() -> Self {
        Self {
            version: None,
            ..Self::default()
        }
    }
}

/// A recording opened for replay.
///
/// Frames come out in stream order, one working buffer at a time. A session
/// cannot be rewound; open the path again to start over, which yields an
/// identical sequence.
pub struct ReplaySession {
    path: PathBuf,
    decoder: FrameDecoder,
    batch: FrameBatch,
    cursor: usize,
    frames_read: usize,
    finished: bool,
}

impl ReplaySession {
    /// Open `path` with the given options.
    ///
    /// Fails with `NotARecording` when the file name carries no usable
    /// version, and with `VersionMismatch` when a declared version disagrees
    /// with the file name. Both are checked before the file is read.
    pub fn open(path: impl AsRef<Path>, options: &ReplayOptions) -> Result<Self> {
        let path = path.as_ref();
        let found = detect_version(path)?;
        let declared = options.version.unwrap_or(found);
        if declared != found {
            return Err(ReplayError::VersionMismatch {
                declared: declared.number(),
                found: found.number(),
                source_desc: format!("file name {}", display_name(path)),
            });
        }
        let data = read_recording(path)?;

        let decoder = FrameDecoder::new(data, declared, options.shape);
        let batch = FrameBatch::new(options.batch_size.max(1), options.shape);

        debug!(path = %path.display(), version = %declared, shape = %options.shape, "opened recording");
        Ok(Self {
            path: path.to_path_buf(),
            decoder,
            batch,
            cursor: 0,
            frames_read: 0,
            finished: false,
        })
    }

    /// Open `path` trusting the version in its file name.
    pub fn open_inferred(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, &ReplayOptions::inferred())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> TtyrecVersion {
        self.decoder.version()
    }

    pub fn shape(&self) -> TerminalShape {
        self.decoder.shape()
    }

    /// Frames handed out so far.
    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    /// Total frames in the recording; known after the first decode.
    pub fn total_frames(&self) -> Option<usize> {
        self.decoder.total_frames()
    }

    /// Borrow the next frame.
    ///
    /// The view points into the session's working buffer and is invalidated
    /// by the next call. Use [`FrameView::to_frame`] to keep it.
    pub fn next_frame(&mut self) -> Result<Option<FrameView<'_>>> {
        if self.cursor >= self.batch.len() {
            if self.finished {
                return Ok(None);
            }
            let progress = match self.decoder.decode_next(&mut self.batch) {
                Ok(progress) => progress,
                Err(e) => {
                    self.finished = true;
                    self.batch.set_len(0);
                    return Err(e);
                }
            };
            self.cursor = 0;
            self.finished = progress.is_finished();
            if progress.filled == 0 {
                return Ok(None);
            }
        }

        let index = self.cursor;
        self.cursor += 1;
        self.frames_read += 1;
        Ok(self.batch.view(index))
    }

    /// Consume the session as an iterator of owned frames.
    pub fn frames(self) -> Frames {
        Frames {
            session: self,
            failed: false,
        }
    }
}

impl IntoIterator for ReplaySession {
    type Item = Result<Frame>;
    type IntoIter = Frames;

    fn into_iter(self) -> Frames {
        self.frames()
    }
}

/// Owning iterator over a session's frames.
///
/// Each item is a copy of the decoded frame. Iteration ends after the first
/// error.
pub struct Frames {
    session: ReplaySession,
    failed: bool,
}

impl Frames {
    pub fn session(&self) -> &ReplaySession {
        &self.session
    }
}

impl Iterator for Frames {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.session.next_frame() {
            Ok(frame) => frame.map(|view| Ok(view.to_frame())),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Frames {}

/// Version encoded in a path's file name.
pub(crate) fn detect_version(path: &Path) -> Result<TtyrecVersion> {
    let name = display_name(path);
    let number = version_from_filename(&name).ok_or_else(|| ReplayError::NotARecording {
        path: path.to_path_buf(),
        reason: "file name has no ttyrec token".to_string(),
    })?;
    u8::try_from(number)
        .ok()
        .and_then(TtyrecVersion::from_number)
        .ok_or_else(|| ReplayError::NotARecording {
            path: path.to_path_buf(),
            reason: format!("unsupported ttyrec version {}", number),
        })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ttyrec::TtyrecWriter;
    use std::fs;
    use tempfile::TempDir;

    fn small_options(version: Option<TtyrecVersion>) -> ReplayOptions {
        ReplayOptions {
            version,
            shape: TerminalShape::new(4, 12),
            batch_size: 2,
        }
    }

    fn write_recording(dir: &TempDir, name: &str, frames: usize) -> PathBuf {
        let version = detect_version(Path::new(name)).unwrap();
        let mut writer = TtyrecWriter::new(Vec::new(), version);
        for i in 0..frames {
            writer
                .output(i as u32, 0, format!("f{}\r\n", i).as_bytes())
                .unwrap();
        }
        let path = dir.path().join(name);
        fs::write(&path, writer.into_inner()).unwrap();
        path
    }

    #[test]
    fn frames_cross_batch_boundaries() {
        let dir = TempDir::new().unwrap();
        let path = write_recording(&dir, "run.ttyrec3", 5);
        let session = ReplaySession::open(&path, &small_options(None)).unwrap();
        let frames: Vec<Frame> = session.frames().collect::<Result<_>>().unwrap();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[2].text(), "f0\nf1\nf2");
        // the last two line feeds scrolled the screen
        assert_eq!(frames[4].text(), "f2\nf3\nf4");
    }

    #[test]
    fn lending_views_track_progress() {
        let dir = TempDir::new().unwrap();
        let path = write_recording(&dir, "run.ttyrec", 3);
        let mut session = ReplaySession::open(&path, &small_options(None)).unwrap();
        let mut seen = 0;
        while let Some(view) = session.next_frame().unwrap() {
            assert_eq!(view.timestamp, seen as i64 * 1_000_000);
            seen += 1;
        }
        assert_eq!(seen, 3);
        assert_eq!(session.frames_read(), 3);
        assert_eq!(session.total_frames(), Some(3));
        assert!(session.next_frame().unwrap().is_none());
    }

    #[test]
    fn reopening_yields_identical_frames() {
        let dir = TempDir::new().unwrap();
        let path = write_recording(&dir, "run.ttyrec2", 4);
        let options = small_options(Some(TtyrecVersion::V2));
        let first: Vec<Frame> = ReplaySession::open(&path, &options)
            .unwrap()
            .frames()
            .collect::<Result<_>>()
            .unwrap();
        let second: Vec<Frame> = ReplaySession::open(&path, &options)
            .unwrap()
            .frames()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn declared_version_must_match_file_name() {
        let dir = TempDir::new().unwrap();
        let path = write_recording(&dir, "run.ttyrec2", 1);
        let err = ReplaySession::open(&path, &small_options(Some(TtyrecVersion::V3)))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ReplayError::VersionMismatch {
                declared: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn path_without_version_is_not_a_recording() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();
        let err = ReplaySession::open_inferred(&path).err().unwrap();
        assert!(err.is_skippable());
    }

    #[test]
    fn unsupported_version_is_not_a_recording() {
        let err = detect_version(Path::new("game.ttyrec9")).unwrap_err();
        assert!(matches!(err, ReplayError::NotARecording { .. }));
    }
}

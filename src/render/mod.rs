//! Rendering recordings to text artifacts.
//!
//! Each recording becomes `<output_dir>/<stem>.txt`: one block per frame with
//! a header line (index, time, action, score) followed by the screen. With
//! color enabled the screen carries SGR sequences taken from a [`Palette`].

mod batch;
mod palette;

pub use batch::{collect_recordings, default_jobs, render_all, BatchOptions, JobOutcome, JobResult};
pub use palette::Palette;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::DateTime;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use tracing::debug;

use crate::actions;
use crate::error::{ReplayError, Result};
use crate::ttyrec::{FrameView, ReplayOptions, ReplaySession};

/// How a [`TextRenderer`] is set up.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub replay: ReplayOptions,
    /// Emit SGR color sequences.
    pub color: bool,
    /// Palette file; the built-in palette when `None`.
    pub palette: Option<PathBuf>,
    /// Also draw every frame on the controlling terminal.
    pub show: bool,
}

/// What rendering one recording produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub frames: usize,
    pub bytes: u64,
}

/// Renders recordings into text files under one output directory.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    output_dir: PathBuf,
    replay: ReplayOptions,
    palette: Option<Palette>,
    show: bool,
}

impl TextRenderer {
    /// Fails with `MissingAsset` if a configured palette cannot be loaded.
    pub fn new(output_dir: impl Into<PathBuf>, options: RenderOptions) -> Result<Self> {
        let palette = match (options.color, options.palette.as_deref()) {
            (false, _) => None,
            (true, Some(path)) => Some(Palette::load(path)?),
            (true, None) => Some(Palette::default()),
        };
        Ok(Self {
            output_dir: output_dir.into(),
            replay: options.replay,
            palette,
            show: options.show,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the artifact for `recording` is written.
    pub fn output_path(&self, recording: &Path) -> PathBuf {
        let stem = recording
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording".to_string());
        self.output_dir.join(format!("{}.txt", stem))
    }

    /// Render one recording to its artifact.
    ///
    /// The artifact is created once the first frame has decoded, so a
    /// recording rejected at open or on its first batch leaves nothing
    /// behind. A failure further into the stream leaves a partial artifact.
    pub fn render(&self, recording: &Path) -> Result<RenderSummary> {
        let mut session = ReplaySession::open(recording, &self.replay)?;
        let output = self.output_path(recording);
        let mut writer = None;
        let mut stdout = self.show.then(io::stdout);

        let mut frames = 0;
        while let Some(frame) = session.next_frame()? {
            if writer.is_none() {
                writer = Some(create_artifact(&output)?);
            }
            if let Some(out) = writer.as_mut() {
                self.write_frame(frames, &frame, out)
                    .map_err(|e| ReplayError::io(&output, e))?;
            }
            if let Some(stdout) = stdout.as_mut() {
                show_frame(stdout, &frame).map_err(|e| ReplayError::io("<stdout>", e))?;
            }
            frames += 1;
        }
        // a recording without frames still gets an (empty) artifact
        let mut out = match writer {
            Some(out) => out,
            None => create_artifact(&output)?,
        };
        out.flush().map_err(|e| ReplayError::io(&output, e))?;

        let bytes = fs::metadata(&output)
            .map_err(|e| ReplayError::io(&output, e))?
            .len();
        debug!(recording = %recording.display(), frames, bytes, "rendered recording");
        Ok(RenderSummary {
            output,
            frames,
            bytes,
        })
    }

    /// Write one frame block: header line, screen, blank separator.
    pub fn write_frame(
        &self,
        index: usize,
        frame: &FrameView<'_>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        writeln!(out, "{}", frame_header(index, frame))?;
        match &self.palette {
            Some(palette) => {
                for row in 0..frame.shape.rows {
                    palette.write_row(frame.row(row), frame.color_row(row), out)?;
                    writeln!(out)?;
                }
            }
            None => {
                for line in frame.lines() {
                    writeln!(out, "{}", line.trim_end())?;
                }
            }
        }
        writeln!(out)
    }
}

fn create_artifact(output: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| ReplayError::io(parent, e))?;
    }
    let file = File::create(output).map_err(|e| ReplayError::io(output, e))?;
    Ok(BufWriter::new(file))
}

/// `frame 12 | 2021-06-01 12:00:00.250000 UTC | action MORE | score 40`
pub fn frame_header(index: usize, frame: &FrameView<'_>) -> String {
    let time = DateTime::from_timestamp_micros(frame.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.6f UTC").to_string())
        .unwrap_or_else(|| frame.timestamp.to_string());
    format!(
        "frame {} | {} | action {} | score {}",
        index,
        time,
        actions::describe(frame.action),
        frame.score
    )
}

/// Draw a frame at the top-left of the terminal.
pub fn show_frame(stdout: &mut io::Stdout, frame: &FrameView<'_>) -> io::Result<()> {
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    for (row, line) in frame.lines().iter().enumerate() {
        queue!(stdout, MoveTo(0, row as u16), Print(line.trim_end()))?;
    }
    stdout.flush()
}

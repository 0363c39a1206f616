//! Print command handler

use anyhow::{Context, Result};
use chrono::DateTime;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use ttyr::actions;
use ttyr::ttyrec::{ReplayOptions, ReplaySession};

/// Print every frame of `ttyrec`, then `finished`.
#[cfg(not(tarpaulin_include))]
pub fn handle(ttyrec: &Path, options: &ReplayOptions, limit: Option<usize>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    print_frames(ttyrec, options, limit, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write the frames of `ttyrec` to `out`.
pub fn print_frames(
    ttyrec: &Path,
    options: &ReplayOptions,
    limit: Option<usize>,
    out: &mut impl Write,
) -> Result<usize> {
    let mut session = ReplaySession::open(ttyrec, options)
        .with_context(|| format!("Failed to open {}", ttyrec.display()))?;
    let start = Instant::now();
    let mut count = 0usize;

    while limit.map_or(true, |l| count < l) {
        let Some(frame) = session
            .next_frame()
            .with_context(|| format!("Failed to decode {}", ttyrec.display()))?
        else {
            break;
        };
        let elapsed = start.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            count as f64 / elapsed
        } else {
            0.0
        };
        let date = DateTime::from_timestamp_micros(frame.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S%.6f UTC").to_string())
            .unwrap_or_else(|| "invalid".to_string());

        writeln!(out, "{}", frame.text())?;
        writeln!(out, "FPS: {:.1}", fps)?;
        writeln!(out, "Timestamp: {} ({})", frame.timestamp, date)?;
        writeln!(out, "Action: {}", actions::describe(frame.action))?;
        writeln!(out, "Score: {}", frame.score)?;
        count += 1;
    }

    writeln!(out, "finished")?;
    Ok(count)
}

//! Messages command handler

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

use ttyr::actions;
use ttyr::env::Observation;
use ttyr::message::{MessageAligner, MessageState};
use ttyr::ttyrec::{ReplayOptions, ReplaySession};

/// One frame's parsed message, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct MessageRecord {
    pub frame: usize,
    pub timestamp: i64,
    pub action: String,
    #[serde(flatten)]
    pub state: MessageState,
}

#[cfg(not(tarpaulin_include))]
pub fn handle(
    ttyrec: &Path,
    options: &ReplayOptions,
    aligner: &MessageAligner,
    json: bool,
    all: bool,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in collect(ttyrec, options, aligner, all)? {
        if json {
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        } else {
            writeln!(out, "[frame {}] {}", record.frame, record.state.text().replace('\n', " | "))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Parse every frame of `ttyrec`.
///
/// Screens that cannot be parsed (two markers, a message that does not line
/// up) are logged and left out; decoding errors end the run.
pub fn collect(
    ttyrec: &Path,
    options: &ReplayOptions,
    aligner: &MessageAligner,
    all: bool,
) -> Result<Vec<MessageRecord>> {
    let mut session = ReplaySession::open(ttyrec, options)
        .with_context(|| format!("Failed to open {}", ttyrec.display()))?;
    let mut records = Vec::new();
    let mut index = 0;

    while let Some(frame) = session
        .next_frame()
        .with_context(|| format!("Failed to decode {}", ttyrec.display()))?
    {
        let parsed = Observation::from_frame(&frame)
            .and_then(|obs| MessageState::parse(&obs.message, &obs.lines, aligner));
        match parsed {
            Ok(state) => {
                let empty = state.message.is_empty() && state.popup.is_empty() && state.marker.is_none();
                if all || !empty {
                    records.push(MessageRecord {
                        frame: index,
                        timestamp: frame.timestamp,
                        action: actions::describe(frame.action),
                        state,
                    });
                }
            }
            Err(e) => warn!(frame = index, error = %e, "could not parse screen"),
        }
        index += 1;
    }
    Ok(records)
}

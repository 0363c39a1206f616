//! Replay command handler

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ttyr::env::{
    AutoMore, Env, EnvArgs, EnvRegistry, EpisodeStats, Info, Pipeline, Transition, TtyrecInfo,
    EPISODE_STATS_KEY,
};
use ttyr::ttyrec::ReplayOptions;
use ttyr::Config;

/// The parts of a transition worth printing.
#[derive(Debug, Serialize)]
struct StepRecord<'a> {
    step: u64,
    reward: f64,
    done: bool,
    truncated: bool,
    turn: Option<u64>,
    score: i32,
    text_message: Option<&'a str>,
    info: &'a Info,
}

/// Build the pipeline the replay command runs.
pub fn build_pipeline(
    config: &Config,
    registry: &EnvRegistry,
    env: &str,
    ttyrec: &Path,
    options: ReplayOptions,
) -> Result<Pipeline> {
    let args = EnvArgs {
        recording: ttyrec.to_path_buf(),
        options,
    };
    let base = registry
        .make(env, &args)
        .with_context(|| format!("Failed to create environment '{}'", env))?;
    Ok(Pipeline::new(base)
        .with_abort_policy(Box::new(config.abort_policy()))
        .with_stage(Box::new(AutoMore::new(config.advancer())))
        .with_stage(Box::new(EpisodeStats::done_only()))
        .with_stage(Box::new(TtyrecInfo::default())))
}

/// Step `pipeline` with a no-op action until the episode ends.
pub fn run(pipeline: &mut Pipeline, mut on_step: impl FnMut(&Transition)) -> Result<Transition> {
    pipeline.reset().context("Failed to reset environment")?;
    loop {
        let transition = pipeline.step(0).context("Failed to step environment")?;
        on_step(&transition);
        if transition.is_terminal() {
            return Ok(transition);
        }
    }
}

#[cfg(not(tarpaulin_include))]
pub fn handle(
    config: &Config,
    env: &str,
    ttyrec: &Path,
    options: ReplayOptions,
    json: bool,
) -> Result<()> {
    let registry = EnvRegistry::with_builtins();
    let mut pipeline = build_pipeline(config, &registry, env, ttyrec, options)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut step = 0u64;
    let mut write_error = None;

    let last = run(&mut pipeline, |t| {
        step += 1;
        let result = if json {
            let record = StepRecord {
                step,
                reward: t.reward,
                done: t.done,
                truncated: t.truncated,
                turn: t.observation.turn,
                score: t.observation.score,
                text_message: t.observation.text_message.as_deref(),
                info: &t.info,
            };
            serde_json::to_writer(&mut out, &record)
                .map_err(io::Error::from)
                .and_then(|_| writeln!(out))
        } else {
            match t.observation.text_message.as_deref() {
                Some(text) if !text.is_empty() => writeln!(out, "{}", text),
                _ => Ok(()),
            }
        };
        if let Err(e) = result {
            write_error.get_or_insert(e);
        }
    })?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    if !json {
        let stats = last
            .info
            .get(EPISODE_STATS_KEY)
            .map(|v| serde_json::to_string_pretty(v))
            .transpose()?
            .unwrap_or_else(|| "{}".to_string());
        writeln!(
            out,
            "episode {} after {} steps: {}",
            if last.truncated { "aborted" } else { "finished" },
            pipeline.episode_steps(),
            stats
        )?;
    }
    out.flush()?;
    Ok(())
}

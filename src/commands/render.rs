//! Render command handler

use anyhow::{bail, Context, Result};
use humansize::{format_size, BINARY};
use std::path::PathBuf;

use ttyr::cli::RenderArgs;
use ttyr::render::{collect_recordings, render_all, JobOutcome, TextRenderer};
use ttyr::Config;

/// Render one recording or a whole directory.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, args: &RenderArgs) -> Result<()> {
    let replay = super::replay_options(config, &args.version);
    let mut options = config.render_options(replay, args.show);
    options.color |= args.color;
    if args.palette.is_some() {
        options.palette = args.palette.clone();
        options.color = true;
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.render.output_dir.clone());
    let renderer = TextRenderer::new(&output_dir, options).context("Failed to set up renderer")?;

    if let Some(ttyrec) = &args.ttyrec {
        let summary = renderer
            .render(ttyrec)
            .with_context(|| format!("Failed to render {}", ttyrec.display()))?;
        println!(
            "{} -> {} ({} frames, {})",
            ttyrec.display(),
            summary.output.display(),
            summary.frames,
            format_size(summary.bytes, BINARY)
        );
        return Ok(());
    }

    let dir: PathBuf = match &args.ttyrec_dir {
        Some(dir) => dir.clone(),
        None => bail!("Either --ttyrec or --ttyrec_dir is required"),
    };
    let recordings = collect_recordings(&dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    let mut batch = config.batch_options();
    if let Some(n) = args.n_jobs {
        batch.n_jobs = n;
    }
    if args.unordered {
        batch.ordered = false;
    }

    let results = render_all(&renderer, &recordings, batch);

    let (mut rendered, mut skipped, mut failed, mut bytes) = (0usize, 0usize, 0usize, 0u64);
    for result in &results {
        match &result.outcome {
            JobOutcome::Rendered(summary) => {
                rendered += 1;
                bytes += summary.bytes;
                println!(
                    "{} -> {} ({} frames)",
                    result.recording.display(),
                    summary.output.display(),
                    summary.frames
                );
            }
            JobOutcome::Skipped(reason) => {
                skipped += 1;
                println!("{} skipped: {}", result.recording.display(), reason);
            }
            JobOutcome::Failed(e) => {
                failed += 1;
                eprintln!("{} failed: {}", result.recording.display(), e);
            }
        }
    }

    println!(
        "Rendered {} of {} recordings ({}) into {}; {} skipped, {} failed",
        rendered,
        results.len(),
        format_size(bytes, BINARY),
        output_dir.display(),
        skipped,
        failed
    );

    if failed > 0 {
        bail!("{} recording(s) failed to render", failed);
    }
    Ok(())
}

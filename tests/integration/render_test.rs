//! Rendering directories of recordings

use std::fs;
use tempfile::TempDir;

use crate::helpers::{sample_game, Compression};
use ttyr::render::{
    collect_recordings, render_all, BatchOptions, JobOutcome, RenderOptions, TextRenderer,
};
use ttyr::ttyrec::{ReplayOptions, TtyrecVersion};

fn populate(dir: &std::path::Path) {
    let game = sample_game(TtyrecVersion::V3);
    game.write(dir, "runs/a/nle.1.0.ttyrec3.bz2", Compression::Bzip2);
    game.write(dir, "runs/b/nle.2.0.ttyrec3.gz", Compression::Gzip);
    game.write(dir, "runs/b/nle.3.0.ttyrec3", Compression::None);
    fs::write(dir.join("runs/b/nle.4.0.ttyrec9"), b"not supported").unwrap();
    fs::write(dir.join("runs/readme.md"), b"ignored").unwrap();
}

fn renderer(out: &std::path::Path) -> TextRenderer {
    TextRenderer::new(
        out,
        RenderOptions {
            replay: ReplayOptions::default(),
            ..RenderOptions::default()
        },
    )
    .unwrap()
}

#[test]
fn directory_render_skips_non_recordings() {
    let dir = TempDir::new().unwrap();
    populate(dir.path());
    let inputs = collect_recordings(&dir.path().join("runs")).unwrap();
    assert_eq!(inputs.len(), 4);

    let out = dir.path().join("out");
    let results = render_all(&renderer(&out), &inputs, BatchOptions::default());

    let rendered = results.iter().filter(|r| r.is_rendered()).count();
    let skipped = results
        .iter()
        .filter(|r| matches!(r.outcome, JobOutcome::Skipped(_)))
        .count();
    assert_eq!((rendered, skipped), (3, 1));

    for stem in ["nle.1.0.ttyrec3", "nle.2.0.ttyrec3", "nle.3.0"] {
        assert!(out.join(format!("{}.txt", stem)).exists(), "missing {}", stem);
    }
}

#[test]
fn artifacts_are_identical_across_runs_and_compressions() {
    let dir = TempDir::new().unwrap();
    populate(dir.path());
    let inputs = collect_recordings(&dir.path().join("runs")).unwrap();

    let first = dir.path().join("first");
    let second = dir.path().join("second");
    render_all(
        &renderer(&first),
        &inputs,
        BatchOptions {
            n_jobs: 2,
            ordered: true,
        },
    );
    render_all(
        &renderer(&second),
        &inputs,
        BatchOptions {
            n_jobs: 3,
            ordered: false,
        },
    );

    let a = fs::read_to_string(first.join("nle.1.0.ttyrec3.txt")).unwrap();
    let b = fs::read_to_string(second.join("nle.1.0.ttyrec3.txt")).unwrap();
    let c = fs::read_to_string(first.join("nle.2.0.ttyrec3.txt")).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(a.matches("\nframe ").count() + 1, 6);
    assert!(a.contains("action MORE"));
}

#[test]
fn other_versions_are_skipped_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let runs = dir.path().join("runs");
    sample_game(TtyrecVersion::V2).write(&runs, "old.ttyrec2", Compression::None);
    sample_game(TtyrecVersion::V1).write(&runs, "older.ttyrec.gz", Compression::Gzip);
    sample_game(TtyrecVersion::V3).write(&runs, "new.ttyrec3", Compression::None);
    let inputs = collect_recordings(&runs).unwrap();

    let out = dir.path().join("out");
    let results = render_all(&renderer(&out), &inputs, BatchOptions::default());

    for result in &results {
        let name = result.recording.file_name().unwrap().to_string_lossy();
        if name == "new.ttyrec3" {
            assert!(result.is_rendered());
        } else {
            assert!(matches!(result.outcome, JobOutcome::Skipped(_)), "{}", name);
        }
    }
    assert!(out.join("new.txt").exists());
    assert!(!out.join("old.txt").exists());
    assert!(!out.join("older.ttyrec.txt").exists());
}

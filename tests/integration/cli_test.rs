//! CLI tests
//!
//! Runs the actual binary against synthetic recordings. Every invocation
//! passes `--config` pointing into a temp dir so the user's settings never
//! leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::helpers::{sample_game, Compression};
use ttyr::ttyrec::TtyrecVersion;

fn ttyr(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ttyr").unwrap();
    cmd.arg("--config")
        .arg(config_dir.join("config.toml"))
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    ttyr(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("print"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("messages"))
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn print_shows_frames_and_finishes() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3.bz2", Compression::Bzip2);
    ttyr(dir.path())
        .args(["print", "--ttyrec"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello Agent, welcome to NetHack!"))
        .stdout(predicate::str::contains("Action: E"))
        .stdout(predicate::str::contains("Score: 4"))
        .stdout(predicate::str::ends_with("finished\n"));
}

#[test]
fn print_reports_version_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V1).write(dir.path(), "g.ttyrec", Compression::None);
    ttyr(dir.path())
        .args(["print", "--ttyrec_version", "3", "--ttyrec"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("version mismatch"));

    ttyr(dir.path())
        .args(["print", "--infer-version", "--ttyrec"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn render_directory_writes_artifacts() {
    let dir = TempDir::new().unwrap();
    let game = sample_game(TtyrecVersion::V3);
    game.write(dir.path(), "runs/x/one.ttyrec3.bz2", Compression::Bzip2);
    game.write(dir.path(), "runs/y/two.ttyrec3", Compression::None);
    fs::write(dir.path().join("runs/y/three.ttyrec5"), b"?").unwrap();
    let out = dir.path().join("out");

    ttyr(dir.path())
        .args(["render", "--ttyrec_dir"])
        .arg(dir.path().join("runs"))
        .arg("--output_dir")
        .arg(&out)
        .args(["--n_jobs", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 2 of 3 recordings"))
        .stdout(predicate::str::contains("1 skipped, 0 failed"));

    assert!(out.join("one.ttyrec3.txt").exists());
    assert!(out.join("two.txt").exists());
}

#[test]
fn render_single_file_with_kebab_flags() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    let out = dir.path().join("renders");
    ttyr(dir.path())
        .args(["render", "--color", "--ttyrec"])
        .arg(&path)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("6 frames"));
    let text = fs::read_to_string(out.join("g.txt")).unwrap();
    assert!(text.contains("\x1b[39mHello Agent"));
}

#[test]
fn messages_json_is_one_object_per_line() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    let output = ttyr(dir.path())
        .args(["messages", "--json", "--ttyrec"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 5);
    assert_eq!(records[2]["message"], "You find a hidden passage.");
    assert_eq!(records[2]["marker"]["kind"], "continue");
    assert_eq!(records[4]["popup"][1], "b - an apple");
    assert_eq!(records[4]["action"], "MORE");
}

#[test]
fn replay_prints_paged_messages_and_stats() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    ttyr(dir.path())
        .args(["replay", "--ttyrec"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("You find a hidden passage.\nThe door opens."))
        .stdout(predicate::str::contains("episode finished"))
        .stdout(predicate::str::contains("\"ttyrecname\": \"g.ttyrec3\""));
}

#[test]
fn unknown_environment_fails() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    ttyr(dir.path())
        .args(["replay", "--env", "nethack", "--ttyrec"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not registered"));
}

#[test]
fn config_commands_use_explicit_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[replay]\nrows = 30\n").unwrap();

    ttyr(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rows = 30"));

    ttyr(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().unwrap();
    ttyr(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ttyr"));
}

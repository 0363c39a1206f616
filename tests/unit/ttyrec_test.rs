//! Unit tests for recording decoding

use tempfile::TempDir;

use crate::helpers::{sample_game, Compression, RecordingBuilder};
use ttyr::ttyrec::{
    read_recording, Frame, FrameBatch, FrameDecoder, ReplayOptions, ReplaySession, TerminalShape,
    TtyrecVersion,
};
use ttyr::ReplayError;

fn frames_of(path: &std::path::Path, options: &ReplayOptions) -> Vec<Frame> {
    ReplaySession::open(path, options)
        .unwrap()
        .frames()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn filled_counts_sum_to_frame_count() {
    let data = sample_game(TtyrecVersion::V3).bytes();
    let shape = TerminalShape::default();
    let mut decoder = FrameDecoder::new(data, TtyrecVersion::V3, shape);
    let mut batch = FrameBatch::new(4, shape);

    let mut total = 0;
    let mut calls = Vec::new();
    loop {
        let progress = decoder.decode_next(&mut batch).unwrap();
        total += progress.filled;
        calls.push((progress.filled, progress.remaining));
        if progress.is_finished() {
            break;
        }
    }
    assert_eq!(calls, vec![(4, 2), (2, 0)]);
    assert_eq!(total, 6);
    assert_eq!(decoder.total_frames(), Some(6));
}

#[test]
fn reopening_yields_identical_frames() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    let options = ReplayOptions {
        batch_size: 3,
        ..ReplayOptions::default()
    };
    let first = frames_of(&path, &options);
    let second = frames_of(&path, &options);
    assert_eq!(first.len(), 6);
    assert_eq!(first, second);
}

#[test]
fn batch_size_does_not_change_frames() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    let small = frames_of(
        &path,
        &ReplayOptions {
            batch_size: 1,
            ..ReplayOptions::default()
        },
    );
    let large = frames_of(&path, &ReplayOptions::default());
    assert_eq!(small, large);
}

#[test]
fn compressed_recordings_decode_like_plain_ones() {
    let dir = TempDir::new().unwrap();
    let game = sample_game(TtyrecVersion::V3);
    let plain = game.write(dir.path(), "a.ttyrec3", Compression::None);
    let bz = game.write(dir.path(), "b.ttyrec3.bz2", Compression::Bzip2);
    let gz = game.write(dir.path(), "c.ttyrec3.gz", Compression::Gzip);

    assert_eq!(read_recording(&bz).unwrap(), game.bytes());
    let options = ReplayOptions::default();
    let expected = frames_of(&plain, &options);
    assert_eq!(frames_of(&bz, &options), expected);
    assert_eq!(frames_of(&gz, &options), expected);
}

#[test]
fn actions_and_scores_attach_to_frames() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    let frames = frames_of(&path, &ReplayOptions::default());

    let actions: Vec<u8> = frames.iter().map(|f| f.action).collect();
    assert_eq!(actions, vec![0, b'l', 0, 0, b'\r', 0]);
    let scores: Vec<i32> = frames.iter().map(|f| f.score).collect();
    assert_eq!(scores, vec![0, 0, 4, 4, 4, 4]);
    assert!(frames.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn screen_contents_follow_the_stream() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3", Compression::None);
    let frames = frames_of(&path, &ReplayOptions::default());

    assert_eq!(frames[0].lines()[0].trim_end(), "Hello Agent, welcome to NetHack!");
    assert_eq!(frames[1].lines()[23].trim_end(), "Dlvl:1 $:0 HP:12(12) T:1");
    assert_eq!(frames[3].lines()[0].trim_end(), "The door opens.");
    assert_eq!(frames[5].lines()[0].trim(), "");
}

#[test]
fn version_one_has_no_metadata() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V1).write(dir.path(), "old.ttyrec", Compression::None);
    let frames = frames_of(&path, &ReplayOptions::inferred());
    assert_eq!(frames.len(), 6);
    assert!(frames.iter().all(|f| f.action == 0 && f.score == 0));
}

#[test]
fn declared_version_must_match_file_name() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V2).write(dir.path(), "g.ttyrec2", Compression::None);
    match ReplaySession::open(&path, &ReplayOptions::default()) {
        Err(ReplayError::VersionMismatch {
            declared, found, ..
        }) => {
            assert_eq!(declared, 3);
            assert_eq!(found, 2);
        }
        other => panic!("expected version mismatch, got ok={}", other.is_ok()),
    }
}

#[test]
fn names_without_token_are_not_recordings() {
    let dir = TempDir::new().unwrap();
    let path = RecordingBuilder::new(TtyrecVersion::V3)
        .output("x")
        .write(dir.path(), "notes.txt", Compression::None);
    let err = ReplaySession::open(&path, &ReplayOptions::default()).err().unwrap();
    assert!(err.is_skippable());
}

#[test]
fn score_record_in_v2_stream_is_rejected() {
    // v3 bytes stored under a v2 name: the score channel is not allowed.
    let dir = TempDir::new().unwrap();
    let data = RecordingBuilder::new(TtyrecVersion::V3)
        .output("a")
        .score(3)
        .output("b")
        .bytes();
    let path = dir.path().join("g.ttyrec2");
    std::fs::write(&path, data).unwrap();

    let mut session = ReplaySession::open_inferred(&path).unwrap();
    let err = session.next_frame().err().unwrap();
    assert!(matches!(err, ReplayError::VersionMismatch { .. }));
}

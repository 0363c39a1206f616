//! Whole recordings through decoding and screen parsing

use tempfile::TempDir;

use crate::helpers::{sample_game, Compression};
use ttyr::env::Observation;
use ttyr::message::{MarkerKind, MessageAligner, MessageState};
use ttyr::ttyrec::{ReplayOptions, ReplaySession, TtyrecVersion};

fn parse_all(path: &std::path::Path) -> Vec<MessageState> {
    let mut session = ReplaySession::open(path, &ReplayOptions::default()).unwrap();
    let aligner = MessageAligner::default();
    let mut states = Vec::new();
    while let Some(frame) = session.next_frame().unwrap() {
        let obs = Observation::from_frame(&frame).unwrap();
        states.push(MessageState::parse(&obs.message, &obs.lines, &aligner).unwrap());
    }
    states
}

#[test]
fn sample_game_messages_in_order() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "nle.1.0.ttyrec3.bz2", Compression::Bzip2);
    let states = parse_all(&path);

    let texts: Vec<String> = states.iter().map(|s| s.text()).collect();
    insta::assert_debug_snapshot!(texts, @r#"
    [
        "Hello Agent, welcome to NetHack!",
        "Hello Agent, welcome to NetHack!",
        "You find a hidden passage.\n--More--",
        "The door opens.",
        "The door opens.\na - a dagger\nb - an apple\n(1 of 2)",
        "",
    ]
    "#);
    assert_eq!(
        states[4].marker.map(|m| m.kind),
        Some(MarkerKind::Page { index: 1, total: 2 })
    );
}

#[test]
fn parsing_is_deterministic_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V3).write(dir.path(), "g.ttyrec3.gz", Compression::Gzip);
    assert_eq!(parse_all(&path), parse_all(&path));
}

#[test]
fn frame_text_is_stable_for_one_buffer() {
    let dir = TempDir::new().unwrap();
    let path = sample_game(TtyrecVersion::V2).write(dir.path(), "g.ttyrec2", Compression::None);
    let options = ReplayOptions {
        version: Some(TtyrecVersion::V2),
        ..ReplayOptions::default()
    };
    let mut session = ReplaySession::open(&path, &options).unwrap();
    while let Some(frame) = session.next_frame().unwrap() {
        assert_eq!(frame.lines(), frame.lines());
        assert_eq!(frame.text(), frame.text());
    }
    assert_eq!(session.frames_read(), 6);
}

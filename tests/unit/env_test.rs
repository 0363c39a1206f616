//! Unit tests for the environment pipeline over real recordings

use tempfile::TempDir;

use crate::helpers::{Compression, RecordingBuilder};
use ttyr::env::{
    AutoMore, EnvArgs, EnvRegistry, Env, EpisodeStats, NoProgressAbort, Pipeline, ReplayEnv,
    EPISODE_STATS_KEY,
};
use ttyr::ttyrec::{ReplayOptions, TtyrecVersion};

fn stalled_game(frames: usize) -> RecordingBuilder {
    let mut game = RecordingBuilder::new(TtyrecVersion::V3);
    for i in 0..frames {
        game = game
            .output(format!("\x1b[H\x1b[KYou search ({}).\x1b[24;1HDlvl:1 T:5", i))
            .input(b's');
    }
    game
}

#[test]
fn stalled_turn_counter_aborts_episode() {
    let dir = TempDir::new().unwrap();
    let path = stalled_game(10).write(dir.path(), "stuck.ttyrec3", Compression::None);

    let mut pipeline = Pipeline::new(Box::new(ReplayEnv::new(&path, ReplayOptions::default())))
        .with_abort_policy(Box::new(NoProgressAbort::new(3, 1_000)));
    let start = pipeline.reset().unwrap();
    assert_eq!(start.turn, Some(5));

    let mut steps = 0;
    let last = loop {
        let t = pipeline.step(b's').unwrap();
        steps += 1;
        if t.is_terminal() {
            break t;
        }
    };
    assert_eq!(steps, 4);
    assert!(last.truncated);
    assert!(!last.done);
    assert_eq!(last.info["aborted"], "no_progress");
}

#[test]
fn step_budget_aborts_even_with_progress() {
    let dir = TempDir::new().unwrap();
    let mut game = RecordingBuilder::new(TtyrecVersion::V3);
    for turn in 1..=10 {
        game = game.output(format!("\x1b[24;1HDlvl:1 T:{}", turn));
    }
    let path = game.write(dir.path(), "busy.ttyrec3", Compression::None);

    let mut pipeline = Pipeline::new(Box::new(ReplayEnv::new(&path, ReplayOptions::default())))
        .with_abort_policy(Box::new(NoProgressAbort::new(150, 2)));
    pipeline.reset().unwrap();
    assert!(!pipeline.step(0).unwrap().truncated);
    assert!(pipeline.step(0).unwrap().truncated);
}

#[test]
fn registry_builds_replay_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = RecordingBuilder::new(TtyrecVersion::V3)
        .output("Hello!")
        .score(10)
        .output("\x1b[HA wall.--More--")
        .output("\x1b[H\x1b[KOuch!")
        .write(dir.path(), "walk.ttyrec3", Compression::None);

    let registry = EnvRegistry::with_builtins();
    let base = registry
        .make(
            "replay",
            &EnvArgs {
                recording: path.clone(),
                options: ReplayOptions::default(),
            },
        )
        .unwrap();
    assert_eq!(base.recording(), Some(path.as_path()));

    let mut pipeline = Pipeline::new(base)
        .with_stage(Box::new(AutoMore::default()))
        .with_stage(Box::new(EpisodeStats::default()));
    pipeline.reset().unwrap();

    let t = pipeline.step(0).unwrap();
    assert!(t.done);
    assert_eq!(t.reward, 10.0);
    assert_eq!(t.observation.text_message.as_deref(), Some("A wall.\nOuch!"));
    assert_eq!(t.info[EPISODE_STATS_KEY]["max_score"], 10);
    assert_eq!(pipeline.episode_steps(), 2);
}

#[test]
fn wrapped_message_pages_through_auto_more() {
    let dir = TempDir::new().unwrap();
    let path = RecordingBuilder::new(TtyrecVersion::V3)
        .output("Hello!")
        .output("\x1b[H\x1b[2JThe kitten bites the jackal.  The jackal bites the\r\n#kitten--More--")
        .output("\x1b[H\x1b[2JThe jackal dies.")
        .write(dir.path(), "fight.ttyrec3", Compression::None);

    let mut pipeline = Pipeline::new(Box::new(ReplayEnv::new(&path, ReplayOptions::default())))
        .with_stage(Box::new(AutoMore::default()));
    pipeline.reset().unwrap();

    let t = pipeline.step(0).unwrap();
    assert_eq!(
        t.observation.text_message.as_deref(),
        Some("The kitten bites the jackal.  The jackal bites the kitten\nThe jackal dies.")
    );
    assert_eq!(t.info["more_steps"], 1);
}

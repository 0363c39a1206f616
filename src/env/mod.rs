//! Steppable game environments and the stages layered over them.
//!
//! An [`Env`] produces [`Observation`]s and answers actions with
//! [`Transition`]s. A [`Pipeline`] owns one base environment, an optional
//! [`AbortPolicy`] consulted after every base step, and an ordered list of
//! [`Stage`]s that post-process each transition (auto-paging, episode
//! statistics, recording info). Environments are created by name through an
//! [`EnvRegistry`] value owned by the caller.

mod abort;
mod pipeline;
mod registry;
mod replay;
mod stages;

pub use abort::{AbortPolicy, NoProgressAbort};
pub use pipeline::{Pipeline, Stage};
pub use registry::{EnvArgs, EnvFactory, EnvRegistry};
pub use replay::ReplayEnv;
pub use stages::{AutoMore, EpisodeStats, TtyrecInfo};

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::message::{screen_message, MarkerScanner};
use crate::ttyrec::FrameView;

/// Free-form per-step diagnostics, keyed by name.
pub type Info = BTreeMap<String, serde_json::Value>;

/// Key under which stages publish end-of-episode statistics.
pub const EPISODE_STATS_KEY: &str = "episode_extra_stats";

static TURN_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bT:(\d+)").expect("static regex"));

/// What an environment shows after a reset or step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// The game's message buffer.
    pub message: String,
    /// Screen rows, full width.
    pub lines: Vec<String>,
    /// (row, column)
    pub cursor: (i16, i16),
    /// In-game turn counter, when the status line shows one.
    pub turn: Option<u64>,
    pub score: i32,
    /// Message text assembled across paginated screens, set by
    /// [`AutoMore`].
    pub text_message: Option<String>,
}

impl Observation {
    /// Build an observation from a decoded frame.
    ///
    /// The message buffer is read off the screen (see [`screen_message`]);
    /// the turn counter is taken from the `T:<n>` field of the status lines.
    pub fn from_frame(frame: &FrameView<'_>) -> Result<Self> {
        let lines = frame.lines();
        let marker = MarkerScanner::scan(&lines)?;
        Ok(Self {
            message: screen_message(&lines, marker.as_ref()),
            turn: parse_turn(&lines),
            cursor: frame.cursor,
            score: frame.score,
            lines,
            text_message: None,
        })
    }
}

/// The outcome of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f64,
    /// The episode ended on its own.
    pub done: bool,
    /// The episode was cut short by an abort policy.
    pub truncated: bool,
    pub info: Info,
}

impl Transition {
    pub fn new(observation: Observation, reward: f64, done: bool) -> Self {
        Self {
            observation,
            reward,
            done,
            truncated: false,
            info: Info::new(),
        }
    }

    /// Whether no further steps should be taken.
    pub fn is_terminal(&self) -> bool {
        self.done || self.truncated
    }
}

/// A steppable environment.
pub trait Env: Send {
    /// Start a new episode.
    fn reset(&mut self) -> Result<Observation>;

    /// Apply one action, given as a key code.
    fn step(&mut self, action: u8) -> Result<Transition>;

    /// The recording this environment reads from or writes to, if any.
    fn recording(&self) -> Option<&Path> {
        None
    }
}

fn parse_turn<S: AsRef<str>>(lines: &[S]) -> Option<u64> {
    lines.iter().rev().take(2).find_map(|line| {
        TURN_COUNTER
            .captures(line.as_ref())
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

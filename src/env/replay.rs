//! A recording played back as an environment.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Env, Observation, Transition};
use crate::error::Result;
use crate::ttyrec::{ReplayOptions, ReplaySession};

/// Replays a recording one frame per step.
///
/// The recording fixes what happens, so the action passed to `step` is
/// ignored; the key that was actually pressed is reported in the
/// transition's `info["action"]`. The reward is the change in score since
/// the previous frame and the episode is done on the last frame.
pub struct ReplayEnv {
    path: PathBuf,
    options: ReplayOptions,
    session: Option<ReplaySession>,
    last: Option<Observation>,
    done: bool,
}

impl ReplayEnv {
    pub fn new(path: impl Into<PathBuf>, options: ReplayOptions) -> Self {
        Self {
            path: path.into(),
            options,
            session: None,
            last: None,
            done: false,
        }
    }

    /// Frames consumed in the current episode.
    pub fn frames_read(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.frames_read())
    }

    fn blank(&self) -> Observation {
        let shape = self.options.shape;
        Observation {
            message: String::new(),
            lines: vec![" ".repeat(shape.columns); shape.rows],
            cursor: (0, 0),
            turn: None,
            score: 0,
            text_message: None,
        }
    }
}

impl Env for ReplayEnv {
    fn reset(&mut self) -> Result<Observation> {
        let mut session = ReplaySession::open(&self.path, &self.options)?;
        let observation = match session.next_frame()? {
            Some(frame) => Observation::from_frame(&frame)?,
            None => self.blank(),
        };
        self.done = session.total_frames() == Some(session.frames_read());
        debug!(path = %self.path.display(), frames = ?session.total_frames(), "replay reset");

        self.session = Some(session);
        self.last = Some(observation.clone());
        Ok(observation)
    }

    fn step(&mut self, _action: u8) -> Result<Transition> {
        let previous = match self.last.take() {
            Some(obs) => obs,
            None => self.reset()?,
        };

        let next = match (self.done, self.session.as_mut()) {
            (false, Some(session)) => match session.next_frame()? {
                Some(frame) => {
                    let action = frame.action;
                    let timestamp = frame.timestamp;
                    let observation = Observation::from_frame(&frame)?;
                    let done = session.total_frames() == Some(session.frames_read());
                    Some((observation, action, timestamp, done))
                }
                None => None,
            },
            _ => None,
        };

        let transition = match next {
            Some((observation, action, timestamp, done)) => {
                let reward = f64::from(observation.score) - f64::from(previous.score);
                self.done = done;
                let mut t = Transition::new(observation, reward, done);
                t.info.insert("action".to_string(), action.into());
                t.info.insert("timestamp".to_string(), timestamp.into());
                t
            }
            None => {
                self.done = true;
                Transition::new(previous, 0.0, true)
            }
        };

        self.last = Some(transition.observation.clone());
        Ok(transition)
    }

    fn recording(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

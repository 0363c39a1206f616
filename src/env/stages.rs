//! Stages provided by this crate.

use serde_json::{json, Map, Value};

use super::pipeline::Stage;
use super::{Env, Info, Observation, Transition, EPISODE_STATS_KEY};
use crate::error::Result;
use crate::message::{MessageState, PaginationAdvancer};

/// Pages through `--More--` prompts after every step.
///
/// The observation's `text_message` receives the text of all screens paged
/// through, and the transition's reward becomes the sum over them.
#[derive(Debug, Clone, Default)]
pub struct AutoMore {
    advancer: PaginationAdvancer,
}

impl AutoMore {
    pub fn new(advancer: PaginationAdvancer) -> Self {
        Self { advancer }
    }
}

impl Stage for AutoMore {
    fn name(&self) -> &'static str {
        "auto_more"
    }

    fn reset(&mut self, observation: &mut Observation, _env: &dyn Env) -> Result<()> {
        let state = MessageState::parse(
            &observation.message,
            &observation.lines,
            self.advancer.aligner(),
        )?;
        observation.text_message = Some(state.segment());
        Ok(())
    }

    fn step(&mut self, env: &mut dyn Env, transition: Transition) -> Result<Transition> {
        let advance = self.advancer.advance(env, transition)?;
        let mut last = advance.last;
        last.reward = advance.reward;
        last.observation.text_message = Some(advance.log);
        if advance.steps > 0 {
            last.info.insert("more_steps".to_string(), advance.steps.into());
        }
        Ok(last)
    }
}

/// Publishes per-episode counters under `episode_extra_stats`.
#[derive(Debug, Clone, Default)]
pub struct EpisodeStats {
    done_only: bool,
    steps: u64,
    total_reward: f64,
    max_score: i32,
}

impl EpisodeStats {
    /// Only publish on the final transition of an episode.
    pub fn done_only() -> Self {
        Self {
            done_only: true,
            ..Self::default()
        }
    }
}

impl Stage for EpisodeStats {
    fn name(&self) -> &'static str {
        "episode_stats"
    }

    fn reset(&mut self, observation: &mut Observation, _env: &dyn Env) -> Result<()> {
        self.steps = 0;
        self.total_reward = 0.0;
        self.max_score = observation.score;
        Ok(())
    }

    fn step(&mut self, _env: &mut dyn Env, mut transition: Transition) -> Result<Transition> {
        self.steps += 1;
        self.total_reward += transition.reward;
        self.max_score = self.max_score.max(transition.observation.score);

        if transition.is_terminal() || !self.done_only {
            let score = transition.observation.score;
            let turn = transition.observation.turn;
            update_extra_stats(&mut transition.info, |stats| {
                stats.insert("step".to_string(), json!(self.steps));
                stats.insert("score".to_string(), json!(score));
                stats.insert("max_score".to_string(), json!(self.max_score));
                stats.insert("total_reward".to_string(), json!(self.total_reward));
                if let Some(turn) = turn {
                    stats.insert("turn".to_string(), json!(turn));
                }
            });
        }
        Ok(transition)
    }
}

/// Adds the recording's file name to `episode_extra_stats`.
#[derive(Debug, Clone)]
pub struct TtyrecInfo {
    done_only: bool,
}

impl Default for TtyrecInfo {
    fn default() -> Self {
        Self { done_only: true }
    }
}

impl TtyrecInfo {
    pub fn new(done_only: bool) -> Self {
        Self { done_only }
    }
}

impl Stage for TtyrecInfo {
    fn name(&self) -> &'static str {
        "ttyrec_info"
    }

    fn step(&mut self, env: &mut dyn Env, mut transition: Transition) -> Result<Transition> {
        if transition.is_terminal() || !self.done_only {
            let name = env
                .recording()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned());
            if let Some(name) = name {
                update_extra_stats(&mut transition.info, |stats| {
                    stats.insert("ttyrecname".to_string(), name.into());
                });
            }
        }
        Ok(transition)
    }
}

/// Edit the `episode_extra_stats` object of `info`, creating it if missing.
fn update_extra_stats(info: &mut Info, update: impl FnOnce(&mut Map<String, Value>)) {
    let mut stats = match info.remove(EPISODE_STATS_KEY) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    update(&mut stats);
    info.insert(EPISODE_STATS_KEY.to_string(), Value::Object(stats));
}

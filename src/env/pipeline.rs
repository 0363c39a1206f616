//! Base environment plus an ordered list of stages.

use std::path::Path;

use tracing::debug;

use super::abort::AbortPolicy;
use super::{Env, Observation, Transition};
use crate::error::Result;

/// Post-processing applied to every transition of a [`Pipeline`].
///
/// Stages run in the order they were added. A stage may take extra steps of
/// its own through `env`, which is the pipeline's base environment with the
/// abort policy applied.
pub trait Stage: Send {
    fn name(&self) -> &'static str;

    fn reset(&mut self, _observation: &mut Observation, _env: &dyn Env) -> Result<()> {
        Ok(())
    }

    fn step(&mut self, env: &mut dyn Env, transition: Transition) -> Result<Transition>;
}

/// A base environment with its stages, built once.
///
/// ```
/// use ttyr::env::{NoProgressAbort, Pipeline, AutoMore, EpisodeStats};
/// # fn build(base: Box<dyn ttyr::env::Env>) -> Pipeline {
/// Pipeline::new(base)
///     .with_abort_policy(Box::new(NoProgressAbort::default()))
///     .with_stage(Box::new(AutoMore::default()))
///     .with_stage(Box::new(EpisodeStats::default()))
/// # }
/// ```
pub struct Pipeline {
    base: Box<dyn Env>,
    stages: Vec<Box<dyn Stage>>,
    abort: Option<Box<dyn AbortPolicy>>,
    steps: u64,
}

impl Pipeline {
    pub fn new(base: Box<dyn Env>) -> Self {
        Self {
            base,
            stages: Vec::new(),
            abort: None,
            steps: 0,
        }
    }

    pub fn with_abort_policy(mut self, policy: Box<dyn AbortPolicy>) -> Self {
        self.abort = Some(policy);
        self
    }

    pub fn with_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Base steps taken in the current episode, including those issued by
    /// stages.
    pub fn episode_steps(&self) -> u64 {
        self.steps
    }
}

impl Env for Pipeline {
    fn reset(&mut self) -> Result<Observation> {
        self.steps = 0;
        if let Some(policy) = self.abort.as_mut() {
            policy.reset();
        }
        let mut observation = self.base.reset()?;
        for stage in &mut self.stages {
            stage.reset(&mut observation, self.base.as_ref())?;
        }
        debug!(stages = ?self.stage_names(), "pipeline reset");
        Ok(observation)
    }

    fn step(&mut self, action: u8) -> Result<Transition> {
        let mut inner = Policed {
            env: self.base.as_mut(),
            policy: self.abort.as_mut(),
            steps: &mut self.steps,
        };
        let mut transition = inner.step(action)?;
        for stage in &mut self.stages {
            transition = stage.step(&mut inner, transition)?;
        }
        Ok(transition)
    }

    fn recording(&self) -> Option<&Path> {
        self.base.recording()
    }
}

/// The base environment as stages see it: every step is counted and checked
/// against the abort policy.
struct Policed<'a> {
    env: &'a mut dyn Env,
    policy: Option<&'a mut Box<dyn AbortPolicy>>,
    steps: &'a mut u64,
}

impl Env for Policed<'_> {
    fn reset(&mut self) -> Result<Observation> {
        self.env.reset()
    }

    fn step(&mut self, action: u8) -> Result<Transition> {
        let mut transition = self.env.step(action)?;
        *self.steps += 1;
        if let Some(policy) = self.policy.as_deref_mut() {
            if !transition.done && policy.should_abort(*self.steps, &transition.observation) {
                debug!(steps = *self.steps, policy = policy.name(), "episode aborted");
                transition.truncated = true;
                transition
                    .info
                    .insert("aborted".to_string(), policy.name().into());
            }
        }
        Ok(transition)
    }

    fn recording(&self) -> Option<&Path> {
        self.env.recording()
    }
}

//! Episode abort policies.

use super::Observation;

/// Decides after every base step whether the episode should be cut short.
pub trait AbortPolicy: Send {
    fn name(&self) -> &'static str;

    /// Forget all per-episode state.
    fn reset(&mut self);

    /// Called once per base step with the step count of the episode so far.
    fn should_abort(&mut self, step: u64, observation: &Observation) -> bool;
}

/// Aborts when the turn counter stops moving or the step budget runs out.
///
/// The game can stall in menus or on repeated invalid input without the
/// in-game clock advancing; after `timeout` consecutive steps on the same
/// turn the episode is aborted. Observations without a turn counter never
/// count as stalled.
#[derive(Debug, Clone)]
pub struct NoProgressAbort {
    timeout: u32,
    max_episode_steps: u64,
    last_turn: Option<u64>,
    stalled_for: u32,
}

impl NoProgressAbort {
    pub const DEFAULT_TIMEOUT: u32 = 150;
    pub const DEFAULT_MAX_EPISODE_STEPS: u64 = 100_000;

    pub fn new(timeout: u32, max_episode_steps: u64) -> Self {
        Self {
            timeout,
            max_episode_steps,
            last_turn: None,
            stalled_for: 0,
        }
    }

    /// Consecutive steps without the turn counter advancing.
    pub fn stalled_for(&self) -> u32 {
        self.stalled_for
    }
}

impl Default for NoProgressAbort {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_MAX_EPISODE_STEPS)
    }
}

impl AbortPolicy for NoProgressAbort {
    fn name(&self) -> &'static str {
        "no_progress"
    }

    fn reset(&mut self) {
        self.last_turn = None;
        self.stalled_for = 0;
    }

    fn should_abort(&mut self, step: u64, observation: &Observation) -> bool {
        match observation.turn {
            Some(turn) if self.last_turn == Some(turn) => self.stalled_for += 1,
            turn => {
                self.last_turn = turn;
                self.stalled_for = 0;
            }
        }
        step >= self.max_episode_steps || self.stalled_for >= self.timeout
    }
}

//! Automatic paging through `--More--` prompts.

use serde::Serialize;
use tracing::debug;

use super::{MessageAligner, MessageState};
use crate::env::{Env, Transition};
use crate::error::Result;

/// Carriage return, which dismisses a `--More--` prompt.
pub const CONTINUE_KEY: u8 = 13;

/// Where the advancer is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceState {
    /// Waiting for the caller's next transition.
    #[default]
    AwaitingInput,
    /// Issuing continue keys; only observable from inside `advance`.
    Paging,
}

/// Result of one [`PaginationAdvancer::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    /// Segments of every screen seen, joined by line breaks.
    pub log: String,
    /// Sum of the rewards of all transitions, including the first.
    pub reward: f64,
    /// Continue keys issued.
    pub steps: usize,
    /// The last transition, with its reward left as the environment
    /// reported it.
    pub last: Transition,
    /// Parsed state of the last screen.
    pub state: MessageState,
}

/// Dismisses `--More--` prompts until the game wants real input.
#[derive(Debug, Clone)]
pub struct PaginationAdvancer {
    aligner: MessageAligner,
    continue_key: u8,
    state: AdvanceState,
}

impl Default for PaginationAdvancer {
    fn default() -> Self {
        Self::new(MessageAligner::default(), CONTINUE_KEY)
    }
}

impl PaginationAdvancer {
    pub fn new(aligner: MessageAligner, continue_key: u8) -> Self {
        Self {
            aligner,
            continue_key,
            state: AdvanceState::AwaitingInput,
        }
    }

    pub fn state(&self) -> AdvanceState {
        self.state
    }

    pub fn aligner(&self) -> &MessageAligner {
        &self.aligner
    }

    /// Page through `first` and whatever follows it.
    ///
    /// While the current screen shows `--More--` and the episode is live,
    /// the continue key is sent to `env`. Paging stops at any other marker,
    /// at a screen without a marker, or when the episode ends; in every case
    /// the log and reward gathered so far are returned.
    pub fn advance(&mut self, env: &mut dyn Env, first: Transition) -> Result<Advance> {
        let mut state = self.parse(&first)?;
        let mut log = state.segment();
        let mut reward = first.reward;
        let mut steps = 0;
        let mut current = first;

        while state.has_continue() && !current.is_terminal() {
            self.state = AdvanceState::Paging;
            let next = match env.step(self.continue_key) {
                Ok(next) => next,
                Err(e) => {
                    self.state = AdvanceState::AwaitingInput;
                    return Err(e);
                }
            };
            steps += 1;
            reward += next.reward;

            state = match self.parse(&next) {
                Ok(state) => state,
                Err(e) => {
                    self.state = AdvanceState::AwaitingInput;
                    return Err(e);
                }
            };
            log.push('\n');
            log.push_str(&state.segment());
            current = next;
        }

        self.state = AdvanceState::AwaitingInput;
        if steps > 0 {
            debug!(steps, reward, done = current.is_terminal(), "paged through prompts");
        }
        Ok(Advance {
            log,
            reward,
            steps,
            last: current,
            state,
        })
    }

    fn parse(&self, transition: &Transition) -> Result<MessageState> {
        let obs = &transition.observation;
        MessageState::parse(&obs.message, &obs.lines, &self.aligner)
    }
}

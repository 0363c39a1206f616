//! Configuration management for ttyr
//!
//! Settings live in `~/.config/ttyr/config.toml`. Every field has a default,
//! so a missing file or a missing section is never an error. Command-line
//! flags override whatever the file says.

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::env::NoProgressAbort;
use crate::message::{MessageAligner, PaginationAdvancer};
use crate::render::{BatchOptions, RenderOptions};
use crate::ttyrec::{ReplayOptions, TerminalShape, TtyrecVersion};

impl Config {
    /// Get the config file path (~/.config/ttyr/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/ttyr)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load from an explicit path, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Check value ranges the type system cannot.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let replay = &self.replay;
        if replay.rows == 0 || replay.columns == 0 {
            return Err(format!(
                "[replay] rows and columns must be positive (got {}x{})",
                replay.rows, replay.columns
            ));
        }
        if replay.batch_size == 0 {
            return Err("[replay] batch_size must be positive".to_string());
        }
        if TtyrecVersion::from_number(replay.default_version).is_none() {
            return Err(format!(
                "[replay] default_version must be 1, 2 or 3 (got {})",
                replay.default_version
            ));
        }
        Ok(())
    }

    /// Replay options, with `version` overriding `[replay].default_version`.
    pub fn replay_options(&self, version: Option<TtyrecVersion>) -> ReplayOptions {
        ReplayOptions {
            version: version.or_else(|| TtyrecVersion::from_number(self.replay.default_version)),
            shape: TerminalShape::new(self.replay.rows, self.replay.columns),
            batch_size: self.replay.batch_size,
        }
    }

    /// Renderer options built on top of `replay`.
    pub fn render_options(&self, replay: ReplayOptions, show: bool) -> RenderOptions {
        RenderOptions {
            replay,
            color: self.render.color,
            palette: self.render.palette.clone(),
            show,
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            n_jobs: self.render.n_jobs,
            ordered: self.render.ordered,
        }
    }

    pub fn aligner(&self) -> MessageAligner {
        MessageAligner::new(self.advance.row_zero_fusion)
    }

    pub fn advancer(&self) -> PaginationAdvancer {
        PaginationAdvancer::new(self.aligner(), self.advance.continue_key)
    }

    pub fn abort_policy(&self) -> NoProgressAbort {
        NoProgressAbort::new(
            self.advance.no_progress_timeout,
            self.advance.max_episode_steps,
        )
    }
}

//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::message::CONTINUE_KEY;
use crate::ttyrec::{COLUMNS, DEFAULT_BATCH_SIZE, ROWS};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub advance: AdvanceConfig,
}

/// How recordings are opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Terminal height
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Terminal width
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Frames decoded per buffer refill
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Version assumed when the command line does not name one
    #[serde(default = "default_version")]
    pub default_version: u8,
}

pub fn default_rows() -> usize {
    ROWS
}

pub fn default_columns() -> usize {
    COLUMNS
}

pub fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

pub fn default_version() -> u8 {
    3
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_columns(),
            batch_size: default_batch_size(),
            default_version: default_version(),
        }
    }
}

/// Text rendering of recordings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Where rendered artifacts go
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Worker threads; 0 uses every available core
    #[serde(default = "default_n_jobs")]
    pub n_jobs: usize,
    /// Report results in input order
    #[serde(default = "default_ordered")]
    pub ordered: bool,
    /// Emit ANSI colors in artifacts
    #[serde(default)]
    pub color: bool,
    /// TOML file with 16 SGR codes (`colors = [...]`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<PathBuf>,
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from("ttyrec_renders")
}

pub fn default_n_jobs() -> usize {
    8
}

pub fn default_ordered() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            n_jobs: default_n_jobs(),
            ordered: default_ordered(),
            color: false,
            palette: None,
        }
    }
}

/// Prompt paging and the no-progress abort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceConfig {
    /// Key sent to dismiss `--More--`
    #[serde(default = "default_continue_key")]
    pub continue_key: u8,
    /// Accept a message fused into the first screen row
    #[serde(default = "default_row_zero_fusion")]
    pub row_zero_fusion: bool,
    /// Steps without a turn change before aborting
    #[serde(default = "default_no_progress_timeout")]
    pub no_progress_timeout: u32,
    /// Hard limit on steps per episode
    #[serde(default = "default_max_episode_steps")]
    pub max_episode_steps: u64,
}

pub fn default_continue_key() -> u8 {
    CONTINUE_KEY
}

pub fn default_row_zero_fusion() -> bool {
    true
}

pub fn default_no_progress_timeout() -> u32 {
    crate::env::NoProgressAbort::DEFAULT_TIMEOUT
}

pub fn default_max_episode_steps() -> u64 {
    crate::env::NoProgressAbort::DEFAULT_MAX_EPISODE_STEPS
}

impl Default for AdvanceConfig {
    fn default() -> Self {
        Self {
            continue_key: default_continue_key(),
            row_zero_fusion: default_row_zero_fusion(),
            no_progress_timeout: default_no_progress_timeout(),
            max_episode_steps: default_max_episode_steps(),
        }
    }
}

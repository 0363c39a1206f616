//! Command handlers for the ttyr CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod messages;
pub mod print;
pub mod render;
pub mod replay;

use anyhow::Result;
use std::path::Path;

use ttyr::cli::VersionArgs;
use ttyr::ttyrec::{ReplayOptions, TtyrecVersion};
use ttyr::Config;

/// Load the configuration, from `path` when one was given on the command line.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Replay options from the config, adjusted by the version flags.
pub fn replay_options(config: &Config, version: &VersionArgs) -> ReplayOptions {
    let mut options = config.replay_options(version.ttyrec_version.and_then(TtyrecVersion::from_number));
    if version.infer_version {
        options.version = None;
    }
    options
}

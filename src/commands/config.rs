//! Config subcommands handler

use anyhow::{Context, Result};
use std::path::Path;

use ttyr::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    print!("{}", toml_str);
    Ok(())
}

/// Print the path settings are read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };
    let state = if path.exists() { "" } else { " (not created, using defaults)" };
    println!("{}{}", path.display(), state);
    Ok(())
}

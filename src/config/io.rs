//! Reading and writing the TOML config file

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::types::Config;

const CONFIG_FILE: &str = "config.toml";

/// `~/.config/ttyr`
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join(env!("CARGO_PKG_NAME")))
}

/// `~/.config/ttyr/config.toml`
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

/// Load and validate `path`. A missing file yields the defaults.
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file: {:?}", path))
        }
    };
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate().map_err(|e| anyhow!("Invalid config: {}", e))?;
    Ok(config)
}

/// Write `config` to `path`, creating parent directories as needed.
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, contents).with_context(|| format!("Failed to write config file: {:?}", path))
}

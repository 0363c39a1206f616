//! CLI definitions for ttyr
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).
//!
//! Long flags use the underscore spellings recorded games are usually
//! scripted with (`--ttyrec_dir`); the kebab-case spellings are accepted too.

use std::path::PathBuf;
use std::sync::LazyLock;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Version string: the package version, plus the commit for dev builds.
pub static VERSION: LazyLock<String> = LazyLock::new(|| {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if sha != "unknown" => {
            format!("{} ({})", env!("CARGO_PKG_VERSION"), &sha[..sha.len().min(7)])
        }
        _ => env!("CARGO_PKG_VERSION").to_string(),
    }
});

/// Build clap styles for consistent CLI appearance.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "ttyr")]
#[command(about = "Replay NetHack ttyrec recordings and recover their messages")]
#[command(
    long_about = "ttyr - replay NetHack ttyrec recordings.

Decodes ttyrec v1/v2/v3 streams (plain, bzip2 or gzip) through a terminal
emulator and exposes every frame: screen text, colors, cursor, timestamp,
the key pressed after it and the in-game score. On top of the frames it
recovers the message line, popup windows and --More-- pagination.

QUICK START:
    ttyr print --ttyrec game.ttyrec3.bz2           Print every frame
    ttyr render --ttyrec_dir runs/ --output_dir out  Render a directory
    ttyr messages --ttyrec game.ttyrec3.bz2 --json  Dump parsed messages
    ttyr replay --ttyrec game.ttyrec3.bz2           Step through as an environment

Settings are read from ~/.config/ttyr/config.toml (see 'ttyr config show')."
)]
#[command(version = VERSION.as_str())]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/ttyr/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// How a recording's version is chosen.
#[derive(Args, Debug, Clone, Default)]
pub struct VersionArgs {
    /// Declared ttyrec version (default from config, normally 3)
    #[arg(
        long = "ttyrec_version",
        visible_alias = "ttyrec-version",
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(1..=3),
        conflicts_with = "infer_version"
    )]
    pub ttyrec_version: Option<u8>,

    /// Trust the version in each file name instead of declaring one
    #[arg(long)]
    pub infer_version: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every frame of a recording
    #[command(long_about = "Print every frame of a recording to stdout.

Each frame shows the screen, followed by its timestamp (raw and as a UTC
date), the action recorded after it, its score and the frames per second
decoded so far.

EXAMPLES:
    ttyr print --ttyrec nle.1234.0.ttyrec3.bz2
    ttyr print --ttyrec old.ttyrec --ttyrec_version 1
    ttyr print --ttyrec game.ttyrec3 --limit 20")]
    Print {
        /// Recording to print
        #[arg(long, value_name = "FILE")]
        ttyrec: PathBuf,
        #[command(flatten)]
        version: VersionArgs,
        /// Stop after this many frames
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Render recordings to text files
    #[command(long_about = "Render recordings to one text file each.

Every recording becomes <output_dir>/<name>.txt with one block per frame.
With --ttyrec_dir, every file whose name contains 'ttyrec' is rendered on a
worker pool; files that turn out not to be recordings are skipped.

EXAMPLES:
    ttyr render --ttyrec game.ttyrec3.bz2 --output_dir renders
    ttyr render --ttyrec_dir runs/ --output_dir renders --n_jobs 4
    ttyr render --ttyrec_dir runs/ --unordered --color")]
    Render(RenderArgs),

    /// Print the message, popup and marker of each frame
    #[command(long_about = "Parse every frame's message line, popup and marker.

Frames without a message, popup or marker are left out unless --all is
given. With --json, each frame is one JSON object per line.

EXAMPLES:
    ttyr messages --ttyrec game.ttyrec3.bz2
    ttyr messages --ttyrec game.ttyrec3.bz2 --json --all")]
    Messages {
        /// Recording to parse
        #[arg(long, value_name = "FILE")]
        ttyrec: PathBuf,
        #[command(flatten)]
        version: VersionArgs,
        /// Emit newline-delimited JSON
        #[arg(long)]
        json: bool,
        /// Include frames with nothing to report
        #[arg(long)]
        all: bool,
        /// Refuse messages fused into the first screen row
        #[arg(long)]
        strict: bool,
    },

    /// Step through a recording as an environment
    #[command(long_about = "Run a recording through the environment pipeline.

The recording is stepped to its end with --More-- prompts paged through
automatically; the run stops early when the turn counter stalls. Prints
every message seen and the episode statistics.

EXAMPLES:
    ttyr replay --ttyrec game.ttyrec3.bz2
    ttyr replay --ttyrec game.ttyrec3.bz2 --json")]
    Replay {
        /// Recording to replay
        #[arg(long, value_name = "FILE")]
        ttyrec: PathBuf,
        #[command(flatten)]
        version: VersionArgs,
        /// Registered environment to create
        #[arg(long, default_value = "replay")]
        env: String,
        /// Emit every transition as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate shell completion scripts.

EXAMPLES:
    ttyr completions bash > ~/.local/share/bash-completion/completions/ttyr
    ttyr completions zsh > ~/.zfunc/_ttyr")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// A single recording to render
    #[arg(long, value_name = "FILE", required_unless_present = "ttyrec_dir")]
    pub ttyrec: Option<PathBuf>,

    /// Render every recording under this directory
    #[arg(
        long = "ttyrec_dir",
        visible_alias = "ttyrec-dir",
        value_name = "DIR",
        conflicts_with = "ttyrec"
    )]
    pub ttyrec_dir: Option<PathBuf>,

    /// Where rendered files go (default from config)
    #[arg(long = "output_dir", visible_alias = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub version: VersionArgs,

    /// Also draw each frame on this terminal
    #[arg(long)]
    pub show: bool,

    /// Worker threads, 0 for one per core (default from config)
    #[arg(long = "n_jobs", visible_alias = "n-jobs", value_name = "N")]
    pub n_jobs: Option<usize>,

    /// Report results as they finish rather than in input order
    #[arg(long)]
    pub unordered: bool,

    /// Write ANSI colors into rendered files
    #[arg(long)]
    pub color: bool,

    /// Palette file for --color
    #[arg(long, value_name = "FILE")]
    pub palette: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

//! ttyr - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use ttyr::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Print {
            ttyrec,
            version,
            limit,
        } => {
            let config = commands::load_config(config_path)?;
            let options = commands::replay_options(&config, &version);
            commands::print::handle(&ttyrec, &options, limit)
        }
        Commands::Render(args) => {
            let config = commands::load_config(config_path)?;
            commands::render::handle(&config, &args)
        }
        Commands::Messages {
            ttyrec,
            version,
            json,
            all,
            strict,
        } => {
            let config = commands::load_config(config_path)?;
            let options = commands::replay_options(&config, &version);
            let aligner = if strict {
                ttyr::message::MessageAligner::strict()
            } else {
                config.aligner()
            };
            commands::messages::handle(&ttyrec, &options, &aligner, json, all)
        }
        Commands::Replay {
            ttyrec,
            version,
            env,
            json,
        } => {
            let config = commands::load_config(config_path)?;
            let options = commands::replay_options(&config, &version);
            commands::replay::handle(&config, &env, &ttyrec, options, json)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => {
                let config = commands::load_config(config_path)?;
                commands::config::handle_show(&config)
            }
            ConfigCommands::Path => commands::config::handle_path(config_path),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}

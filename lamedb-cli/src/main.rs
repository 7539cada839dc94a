//! lamedb-cli: inspect enigma2 lamedb catalogs from the command line.

use clap::Parser;
use log::LevelFilter;

mod commands;
mod config;
mod context;

use context::{Cli, Commands};

/// Initialise env_logger. `RUST_LOG` wins, then `-v`, then the config level.
fn init_logging(verbose: bool, configured: Option<LevelFilter>) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        configured.unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(cli.verbose, config.logging.level_filter());

    let code = match cli.command {
        Commands::Info { lamedb } => commands::cmd_info(lamedb, &config),
        Commands::Export { lamedb, format } => commands::cmd_export(lamedb, format, &config),
        Commands::Lookup {
            lamedb,
            name,
            package,
        } => commands::cmd_lookup(lamedb, name, package, &config),
        Commands::Frequency { lamedb, signature } => {
            commands::cmd_frequency(lamedb, signature, &config)
        }
        Commands::Resolve {
            lamedb,
            bouquet,
            sd_tv_only,
            format,
        } => commands::cmd_resolve(lamedb, bouquet, sd_tv_only, format, &config),
    };

    std::process::exit(code);
}

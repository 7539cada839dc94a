use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

#[derive(Debug, Parser)]
#[clap(name = "lamedb-cli")]
#[clap(about = "Inspect enigma2 lamedb catalogs and resolve bouquet entries against them.", long_about = None)]
#[clap(author = "maleicacid")]
#[clap(version)]
pub(crate) struct Cli {
    /// Configuration file.{n}
    /// Defaults to `lamedb.toml` in the working directory when present.
    #[clap(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Output format for service listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Show the format version and record counts of a lamedb file.
    #[clap(name = "info")]
    Info {
        /// Path to the lamedb file.{n}
        /// Falls back to `catalog.path` from the configuration file.
        #[clap(value_name = "LAMEDB")]
        lamedb: Option<PathBuf>,
    },

    /// List every service with its transponder signature.
    #[clap(name = "export")]
    Export {
        /// Path to the lamedb file.
        #[clap(value_name = "LAMEDB")]
        lamedb: Option<PathBuf>,

        /// Output format.{n}
        /// Falls back to `output.format` from the configuration file.
        #[clap(value_enum, long, short = 'f')]
        format: Option<OutputFormat>,
    },

    /// Find a service key by display name and provider.{n}
    /// Prints similar-sounding names when nothing matches.
    #[clap(name = "lookup")]
    Lookup {
        /// Path to the lamedb file.
        #[clap(value_name = "LAMEDB")]
        lamedb: Option<PathBuf>,

        /// Service display name (case-insensitive).
        #[clap(long, short = 'n', required = true)]
        name: String,

        /// Provider name (case-insensitive).{n}
        /// Only consulted when several providers carry the name.
        #[clap(long, short = 'p', default_value = "")]
        package: String,
    },

    /// Find the first service on a transponder signature.{n}
    /// The signature is `position,frequency,polarization,fec`,
    /// e.g. `192,11778000,V,3/4`.
    #[clap(name = "frequency")]
    Frequency {
        /// Path to the lamedb file.
        #[clap(value_name = "LAMEDB")]
        lamedb: Option<PathBuf>,

        /// Transponder signature.
        #[clap(long, short = 's', required = true)]
        signature: String,
    },

    /// Resolve the entries of a bouquet file against a lamedb file.
    #[clap(name = "resolve")]
    Resolve {
        /// Path to the lamedb file.
        #[clap(value_name = "LAMEDB")]
        lamedb: Option<PathBuf>,

        /// Path to the bouquet file (e.g. `userbouquet.favourites.tv`).
        #[clap(long, short = 'b', value_name = "BOUQUET", required = true)]
        bouquet: PathBuf,

        /// Only report standard-definition TV services on DVB-S carriers.
        #[clap(long)]
        sd_tv_only: bool,

        /// Output format.
        #[clap(value_enum, long, short = 'f')]
        format: Option<OutputFormat>,
    },
}

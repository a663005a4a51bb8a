use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Terminal dashboard for the student record store.
#[derive(Debug, Parser)]
#[command(name = "studentdash", version, about)]
pub struct Cli {
    /// Log level for the rolling log file and stderr.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch records, apply filters and print the table and chart.
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Filter as COLUMN=VALUE; repeat to combine (all must match).
        #[arg(short, long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Edit filters at a prompt and re-render on demand.
    Interactive {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Seed a store from a JSON array of records.
    Import {
        /// SQLite store to write into (created when missing).
        #[arg(long)]
        db: PathBuf,

        /// JSON file holding the records.
        file: PathBuf,
    },
}

/// Where records come from. `--db` takes precedence over `--url`.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Base URL of a running studentdash server.
    #[arg(long, env = "STUDENTDASH_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub url: String,

    /// Read a local SQLite store instead of calling the server.
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Splits `COLUMN=VALUE` at the first `=`.
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(column, value)| (column.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected COLUMN=VALUE, got `{raw}`"))
}

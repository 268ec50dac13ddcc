//! Runtime settings: command-line flags with environment fallbacks.
//!
//! A `.env` file in the working directory is honoured through `dotenvy` before parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which table is printed once every command has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputKind {
    /// Every charity project.
    #[default]
    Projects,
    /// Every donation.
    Donations,
    /// Closed projects ranked by how fast they were funded.
    Completion,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Replays charity fund commands and prints the ledger", long_about = None)]
pub struct Settings {
    /// Input commands CSV file
    pub input: PathBuf,

    /// Path to persistent database (optional). Requires the `storage-rocksdb` feature.
    #[arg(long, env = "CHARITY_FUND_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Table written to stdout
    #[arg(long, value_enum, env = "CHARITY_FUND_OUTPUT", default_value_t = OutputKind::Projects)]
    pub output: OutputKind,

    /// Log filter directive for stderr logging (e.g. `info`, `charity_fund=debug`)
    #[arg(long, env = "CHARITY_FUND_LOG", default_value = "warn")]
    pub log_filter: String,
}

impl Settings {
    /// Loads `.env` if present, then parses flags and environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }
}

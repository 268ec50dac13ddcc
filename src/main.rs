use charity_fund::application::fund::CharityFund;
use charity_fund::config::{OutputKind, Settings};
use charity_fund::domain::ports::{DonationStoreBox, ProjectStoreBox};
use charity_fund::infrastructure::in_memory::{InMemoryDonationStore, InMemoryProjectStore};
#[cfg(feature = "storage-rocksdb")]
use charity_fund::infrastructure::rocksdb::RocksDBStore;
use charity_fund::interfaces::csv::command_reader::CommandReader;
use charity_fund::interfaces::csv::ledger_writer::LedgerWriter;
use charity_fund::interfaces::csv::report_writer::ReportWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();
    init_tracing(&settings.log_filter);

    let fund = open_fund(settings.db_path.as_deref())?;

    // Replay commands; a rejected command never stops the stream
    let file = File::open(&settings.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let mut applied = 0usize;
    let mut rejected = 0usize;
    for command in reader.commands() {
        match command {
            Ok(command) => match fund.execute(command).await {
                Ok(()) => applied += 1,
                Err(e) => {
                    rejected += 1;
                    warn!(error = %e, "Error processing command");
                }
            },
            Err(e) => {
                rejected += 1;
                warn!(error = %e, "Error reading command");
            }
        }
    }
    info!(applied, rejected, "commands replayed");

    let stdout = io::stdout();
    match settings.output {
        OutputKind::Projects => {
            let projects = fund.projects().await.into_diagnostic()?;
            LedgerWriter::new(stdout.lock())
                .write_projects(&projects)
                .into_diagnostic()?;
        }
        OutputKind::Donations => {
            let donations = fund.donations().await.into_diagnostic()?;
            LedgerWriter::new(stdout.lock())
                .write_donations(&donations)
                .into_diagnostic()?;
        }
        OutputKind::Completion => {
            let ranked = fund.projects_by_completion_rate().await.into_diagnostic()?;
            ReportWriter::new(stdout.lock())
                .write_completion(&ranked)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn open_fund(db_path: Option<&Path>) -> Result<CharityFund> {
    let (projects, donations): (ProjectStoreBox, DonationStoreBox) = match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            let projects: ProjectStoreBox = Box::new(store.clone());
            let donations: DonationStoreBox = Box::new(store);
            (projects, donations)
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            in_memory()
        }
        None => in_memory(),
    };
    Ok(CharityFund::new(projects, donations))
}

fn in_memory() -> (ProjectStoreBox, DonationStoreBox) {
    let projects: ProjectStoreBox = Box::new(InMemoryProjectStore::new());
    let donations: DonationStoreBox = Box::new(InMemoryDonationStore::new());
    (projects, donations)
}

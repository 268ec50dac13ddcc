#![allow(dead_code)]

use charity_fund::application::fund::CharityFund;
use charity_fund::domain::donation::DonationDraft;
use charity_fund::domain::money::Amount;
use charity_fund::domain::project::ProjectDraft;
use charity_fund::infrastructure::in_memory::{InMemoryDonationStore, InMemoryProjectStore};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "type, id, name, description, amount, user, comment";

/// Writes a commands CSV (header included) to a temporary file.
pub fn commands_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn in_memory_fund() -> CharityFund {
    CharityFund::new(
        Box::new(InMemoryProjectStore::new()),
        Box::new(InMemoryDonationStore::new()),
    )
}

pub fn project_draft(name: &str, full: Decimal) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        description: format!("{name} description"),
        full_amount: Amount::new(full).unwrap(),
    }
}

pub fn donation_draft(user_id: u32, full: Decimal) -> DonationDraft {
    DonationDraft {
        user_id,
        full_amount: Amount::new(full).unwrap(),
        comment: None,
    }
}

use crate::domain::donation::Donation;
use crate::domain::project::CharityProject;
use crate::error::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

const PROJECT_HEADER: [&str; 8] = [
    "id",
    "name",
    "description",
    "full_amount",
    "invested_amount",
    "fully_invested",
    "create_date",
    "close_date",
];

const DONATION_HEADER: [&str; 8] = [
    "id",
    "user_id",
    "comment",
    "full_amount",
    "invested_amount",
    "fully_invested",
    "create_date",
    "close_date",
];

#[derive(Serialize)]
struct ProjectRow<'a> {
    id: u32,
    name: &'a str,
    description: &'a str,
    full_amount: Decimal,
    invested_amount: Decimal,
    fully_invested: bool,
    create_date: DateTime<Utc>,
    close_date: Option<DateTime<Utc>>,
}

impl<'a> From<&'a CharityProject> for ProjectRow<'a> {
    fn from(project: &'a CharityProject) -> Self {
        let funding = &project.funding;
        Self {
            id: project.id,
            name: &project.name,
            description: &project.description,
            full_amount: funding.full_amount().value().normalize(),
            invested_amount: funding.invested_amount().value().normalize(),
            fully_invested: funding.is_fully_invested(),
            create_date: funding.create_date(),
            close_date: funding.close_date(),
        }
    }
}

#[derive(Serialize)]
struct DonationRow<'a> {
    id: u32,
    user_id: u32,
    comment: Option<&'a str>,
    full_amount: Decimal,
    invested_amount: Decimal,
    fully_invested: bool,
    create_date: DateTime<Utc>,
    close_date: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Donation> for DonationRow<'a> {
    fn from(donation: &'a Donation) -> Self {
        let funding = &donation.funding;
        Self {
            id: donation.id,
            user_id: donation.user_id,
            comment: donation.comment.as_deref(),
            full_amount: funding.full_amount().value().normalize(),
            invested_amount: funding.invested_amount().value().normalize(),
            fully_invested: funding.is_fully_invested(),
            create_date: funding.create_date(),
            close_date: funding.close_date(),
        }
    }
}

/// Writes the ledger state as CSV. The header is written even when there are no rows.
pub struct LedgerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_projects(&mut self, projects: &[CharityProject]) -> Result<()> {
        self.writer.write_record(PROJECT_HEADER)?;
        for project in projects {
            self.writer.serialize(ProjectRow::from(project))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_donations(&mut self, donations: &[Donation]) -> Result<()> {
        self.writer.write_record(DONATION_HEADER)?;
        for donation in donations {
            self.writer.serialize(DonationRow::from(donation))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::funding::Funding;
    use crate::domain::money::{Amount, Balance};
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_projects_normalizes_amounts() {
        let mut funding = Funding::new(Amount::new(dec!(100.00)).unwrap(), Utc::now());
        funding.invest(Balance::new(dec!(60.50)), Utc::now());
        let project = CharityProject {
            id: 1,
            name: "Cats".to_string(),
            description: "Food, for cats".to_string(),
            funding,
        };

        let mut out = Vec::new();
        LedgerWriter::new(&mut out).write_projects(&[project]).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,description,full_amount,invested_amount,fully_invested,create_date,close_date")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,Cats,\"Food, for cats\",100,60.5,false,"));
        assert!(row.ends_with(','));
    }

    #[test]
    fn test_write_empty_donations_keeps_header() {
        let mut out = Vec::new();
        LedgerWriter::new(&mut out).write_donations(&[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,user_id,comment,full_amount,invested_amount,fully_invested,create_date,close_date\n"
        );
    }
}

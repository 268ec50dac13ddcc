use crate::application::command::Command;
use crate::domain::donation::DonationDraft;
use crate::domain::money::Amount;
use crate::domain::project::{ProjectDraft, ProjectUpdate};
use crate::error::{FundError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Project,
    Update,
    Delete,
    Donation,
}

/// One raw row of the command stream: `type, id, name, description, amount, user, comment`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub r#type: CommandType,
    pub id: u32,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
    pub user: Option<u32>,
    pub comment: Option<String>,
}

impl TryFrom<CommandRecord> for Command {
    type Error = FundError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let id = record.id;
        let amount = record.amount.map(Amount::new).transpose()?;
        match record.r#type {
            CommandType::Project => Ok(Command::CreateProject {
                id,
                draft: ProjectDraft {
                    name: required(record.name, "name")?,
                    description: required(record.description, "description")?,
                    full_amount: required(amount, "amount")?,
                },
            }),
            CommandType::Update => Ok(Command::UpdateProject {
                id,
                update: ProjectUpdate {
                    name: record.name,
                    description: record.description,
                    full_amount: amount,
                },
            }),
            CommandType::Delete => Ok(Command::DeleteProject { id }),
            CommandType::Donation => Ok(Command::Donate {
                id,
                draft: DonationDraft {
                    user_id: required(record.user, "user")?,
                    full_amount: required(amount, "amount")?,
                    comment: record.comment,
                },
            }),
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| FundError::ValidationError(format!("Missing required field: {field}")))
}

/// Reads ledger commands from a CSV source.
///
/// Wraps `csv::Reader`, trims whitespace and tolerates short rows. Each row is validated into
/// a [`Command`] independently, so one bad row does not stop the stream.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and converts commands.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| result.map_err(FundError::from).and_then(Command::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "type, id, name, description, amount, user, comment\n";

    fn read(rows: &str) -> Vec<Result<Command>> {
        let data = format!("{HEADER}{rows}");
        CommandReader::new(data.as_bytes()).commands().collect()
    }

    #[test]
    fn test_reader_valid_stream() {
        let results = read(
            "project, 1, Cats, Food for cats, 100, ,\n\
             donation, 1, , , 60.5, 7, for the cats\n\
             update, 1, , , 120, ,\n\
             delete, 1, , , , ,\n",
        );

        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &Command::CreateProject {
                id: 1,
                draft: ProjectDraft {
                    name: "Cats".to_string(),
                    description: "Food for cats".to_string(),
                    full_amount: Amount::new(dec!(100)).unwrap(),
                },
            }
        );
        assert_eq!(
            results[1].as_ref().unwrap(),
            &Command::Donate {
                id: 1,
                draft: DonationDraft {
                    user_id: 7,
                    full_amount: Amount::new(dec!(60.5)).unwrap(),
                    comment: Some("for the cats".to_string()),
                },
            }
        );
        assert!(matches!(
            results[2].as_ref().unwrap(),
            Command::UpdateProject { id: 1, update } if update.name.is_none()
                && update.full_amount == Some(Amount::new(dec!(120)).unwrap())
        ));
        assert_eq!(results[3].as_ref().unwrap(), &Command::DeleteProject { id: 1 });
    }

    #[test]
    fn test_reader_keeps_full_amount_precision() {
        let results = read(
            "donation, 1, , , 12345678901234567.89, 7,\n\
             donation, 2, , , 1e2, 7,\n\
             donation, 3, , , 12abc, 7,\n",
        );

        assert!(matches!(
            results[0].as_ref().unwrap(),
            Command::Donate { draft, .. }
                if draft.full_amount.value() == dec!(12345678901234567.89)
        ));
        assert!(matches!(
            results[1].as_ref().unwrap(),
            Command::Donate { draft, .. } if draft.full_amount.value() == dec!(100)
        ));
        assert!(matches!(results[2], Err(FundError::CsvError(_))));
    }

    #[test]
    fn test_reader_malformed_lines() {
        let results = read(
            "invalid, 1, , , 1.0, ,\n\
             donation, 2, , , , 7,\n\
             donation, 3, , , -5, 7,\n\
             project, 4, Dogs, , 10, ,\n\
             donation, 5, , , 5, 7,\n",
        );

        assert_eq!(results.len(), 5);
        assert!(matches!(results[0], Err(FundError::CsvError(_))));
        assert!(matches!(results[1], Err(FundError::ValidationError(_))));
        assert!(matches!(results[2], Err(FundError::ValidationError(_))));
        assert!(matches!(results[3], Err(FundError::ValidationError(_))));
        assert!(results[4].is_ok());
    }
}

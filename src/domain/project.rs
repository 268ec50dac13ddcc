use super::funding::{Fundable, Funding};
use super::money::Amount;
use crate::error::{FundError, Result};
use serde::{Deserialize, Serialize};

pub const NAME_MIN_LEN: usize = 1;
pub const NAME_MAX_LEN: usize = 100;

/// A charity project collecting donations towards a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharityProject {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub funding: Funding,
}

impl Fundable for CharityProject {
    fn id(&self) -> u32 {
        self.id
    }

    fn funding(&self) -> &Funding {
        &self.funding
    }

    fn funding_mut(&mut self) -> &mut Funding {
        &mut self.funding
    }
}

/// Fields required to open a new project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub full_amount: Amount,
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_description(&self.description)
    }
}

/// A partial administrative update. Absent fields are left as they are.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub full_amount: Option<Amount>,
}

impl ProjectUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none() && self.description.is_none() && self.full_amount.is_none() {
            return Err(FundError::ValidationError(
                "Update must change at least one field".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.trim().chars().count();
    if (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(FundError::ValidationError(format!(
            "Project name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
        )))
    }
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        Err(FundError::ValidationError(
            "Project description cannot be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}

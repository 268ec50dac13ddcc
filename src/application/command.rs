use crate::domain::donation::DonationDraft;
use crate::domain::project::{ProjectDraft, ProjectUpdate};

/// A single request to mutate the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateProject { id: u32, draft: ProjectDraft },
    UpdateProject { id: u32, update: ProjectUpdate },
    DeleteProject { id: u32 },
    Donate { id: u32, draft: DonationDraft },
}

use super::funding::{Fundable, Funding};
use super::money::Amount;
use serde::{Deserialize, Serialize};

/// A user's donation, invested into open projects oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: u32,
    pub user_id: u32,
    pub comment: Option<String>,
    pub funding: Funding,
}

impl Fundable for Donation {
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

#[derive(Debug, Clone, PartialEq)]
pub struct DonationDraft {
    pub user_id: u32,
    pub full_amount: Amount,
    pub comment: Option<String>,
}

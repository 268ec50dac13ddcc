use super::money::{Amount, Balance};
use crate::error::{FundError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Lifecycle of a fundable entity.
///
/// A closed entity carries no invested amount of its own: it is, by construction,
/// invested up to its full amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FundingState {
    Open { invested: Balance },
    Closed { close_date: DateTime<Utc> },
}

/// The capacity shared by projects and donations: a target, a running total and dates.
///
/// `sequence` records creation order among entities of the same kind and breaks ties between
/// equal creation dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FundingRecord")]
pub struct Funding {
    full_amount: Amount,
    create_date: DateTime<Utc>,
    sequence: u64,
    state: FundingState,
}

/// Unchecked wire form of [`Funding`].
#[derive(Deserialize)]
struct FundingRecord {
    full_amount: Amount,
    create_date: DateTime<Utc>,
    #[serde(default)]
    sequence: u64,
    state: FundingState,
}

impl TryFrom<FundingRecord> for Funding {
    type Error = FundError;

    fn try_from(record: FundingRecord) -> Result<Self> {
        if let FundingState::Open { invested } = record.state {
            if invested.value().is_sign_negative() {
                return Err(FundError::ValidationError(
                    "Invested amount cannot be negative".to_string(),
                ));
            }
            if invested >= Balance::from(record.full_amount) {
                return Err(FundError::ValidationError(format!(
                    "Open funding has {} invested of {}",
                    invested.value(),
                    record.full_amount.value()
                )));
            }
        }
        Ok(Self {
            full_amount: record.full_amount,
            create_date: record.create_date,
            sequence: record.sequence,
            state: record.state,
        })
    }
}

impl Funding {
    /// Opens a new funding with nothing invested yet.
    pub fn new(full_amount: Amount, create_date: DateTime<Utc>) -> Self {
        Self {
            full_amount,
            create_date,
            sequence: 0,
            state: FundingState::Open {
                invested: Balance::ZERO,
            },
        }
    }

    /// Sets the creation sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn full_amount(&self) -> Amount {
        self.full_amount
    }

    pub fn invested_amount(&self) -> Balance {
        match self.state {
            FundingState::Open { invested } => invested,
            FundingState::Closed { .. } => self.full_amount.into(),
        }
    }

    /// Capacity still available on this side of an allocation.
    pub fn remaining(&self) -> Balance {
        Balance::from(self.full_amount) - self.invested_amount()
    }

    pub fn is_fully_invested(&self) -> bool {
        matches!(self.state, FundingState::Closed { .. })
    }

    pub fn create_date(&self) -> DateTime<Utc> {
        self.create_date
    }

    pub fn close_date(&self) -> Option<DateTime<Utc>> {
        match self.state {
            FundingState::Closed { close_date } => Some(close_date),
            FundingState::Open { .. } => None,
        }
    }

    pub fn state(&self) -> FundingState {
        self.state
    }

    /// Moves `amount` into the invested total, closing at `now` once the target is reached.
    ///
    /// A closed funding is left untouched.
    pub fn invest(&mut self, amount: Balance, now: DateTime<Utc>) {
        if let FundingState::Open { invested } = self.state {
            debug_assert!(amount <= self.remaining());
            let invested = invested + amount;
            self.state = if invested >= Balance::from(self.full_amount) {
                FundingState::Closed { close_date: now }
            } else {
                FundingState::Open { invested }
            };
        }
    }

    /// Changes the target of an open funding.
    ///
    /// The new target may not drop below what is already invested. Reaching it exactly closes
    /// the funding at `now`.
    pub fn resize(&mut self, full_amount: Amount, now: DateTime<Utc>) -> Result<()> {
        let FundingState::Open { invested } = self.state else {
            return Err(FundError::ValidationError(
                "Closed funding cannot be resized".to_string(),
            ));
        };
        if Balance::from(full_amount) < invested {
            return Err(FundError::AmountBelowInvested {
                invested: invested.value(),
                requested: full_amount.value(),
            });
        }
        self.full_amount = full_amount;
        if Balance::from(full_amount) == invested {
            self.state = FundingState::Closed { close_date: now };
        }
        Ok(())
    }
}

/// An entity whose capacity can be consumed by the allocation engine.
pub trait Fundable {
    fn id(&self) -> u32;
    fn funding(&self) -> &Funding;
    fn funding_mut(&mut self) -> &mut Funding;
}

/// Allocation priority: oldest first, then creation sequence, then id.
pub fn oldest_first<F: Fundable>(a: &F, b: &F) -> Ordering {
    a.funding()
        .create_date()
        .cmp(&b.funding().create_date())
        .then_with(|| a.funding().sequence().cmp(&b.funding().sequence()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// The sequence number following the highest one in `existing`.
pub fn next_sequence<F: Fundable>(existing: &[F]) -> u64 {
    existing
        .iter()
        .map(|e| e.funding().sequence())
        .max()
        .map_or(1, |max| max + 1)
}

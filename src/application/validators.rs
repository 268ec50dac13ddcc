//! Rules enforced before the ledger is touched.
//!
//! The allocation engine assumes well-formed input; these checks are what make it so.

use crate::domain::money::{Amount, Balance};
use crate::domain::ports::{DonationStore, ProjectStore};
use crate::domain::project::CharityProject;
use crate::error::{FundError, Result};

pub async fn check_project_exists(store: &dyn ProjectStore, id: u32) -> Result<CharityProject> {
    store.get(id).await?.ok_or(FundError::ProjectNotFound(id))
}

pub async fn check_project_id_free(store: &dyn ProjectStore, id: u32) -> Result<()> {
    match store.get(id).await? {
        Some(_) => Err(FundError::DuplicateId {
            kind: "Project",
            id,
        }),
        None => Ok(()),
    }
}

pub async fn check_donation_id_free(store: &dyn DonationStore, id: u32) -> Result<()> {
    match store.get(id).await? {
        Some(_) => Err(FundError::DuplicateId {
            kind: "Donation",
            id,
        }),
        None => Ok(()),
    }
}

/// Fails if another project already uses `name`. The project being renamed, if any, is ignored.
pub async fn check_project_name_free(
    store: &dyn ProjectStore,
    name: &str,
    renamed: Option<u32>,
) -> Result<()> {
    match store.get_by_name(name).await? {
        Some(existing) if Some(existing.id) != renamed => {
            Err(FundError::ProjectNameOccupied(name.to_string()))
        }
        _ => Ok(()),
    }
}

pub fn check_project_is_open(project: &CharityProject) -> Result<()> {
    if project.funding.is_fully_invested() {
        Err(FundError::ProjectClosed(project.id))
    } else {
        Ok(())
    }
}

pub fn check_project_not_invested(project: &CharityProject) -> Result<()> {
    if project.funding.invested_amount().is_zero() {
        Ok(())
    } else {
        Err(FundError::ProjectInvested(project.id))
    }
}

pub fn check_new_full_amount(project: &CharityProject, full_amount: Amount) -> Result<()> {
    let invested = project.funding.invested_amount();
    if Balance::from(full_amount) < invested {
        Err(FundError::AmountBelowInvested {
            invested: invested.value(),
            requested: full_amount.value(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::funding::Funding;
    use crate::infrastructure::in_memory::InMemoryProjectStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn project(id: u32, name: &str) -> CharityProject {
        CharityProject {
            id,
            name: name.to_string(),
            description: "desc".to_string(),
            funding: Funding::new(Amount::new(dec!(100)).unwrap(), Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_name_check_ignores_renamed_project() {
        let store = InMemoryProjectStore::new();
        store.store(project(1, "Cats")).await.unwrap();

        assert!(check_project_name_free(&store, "Dogs", None).await.is_ok());
        assert!(check_project_name_free(&store, "Cats", Some(1)).await.is_ok());
        assert!(matches!(
            check_project_name_free(&store, "Cats", Some(2)).await,
            Err(FundError::ProjectNameOccupied(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_project() {
        let store = InMemoryProjectStore::new();
        assert!(matches!(
            check_project_exists(&store, 42).await,
            Err(FundError::ProjectNotFound(42))
        ));
    }

    #[test]
    fn test_invested_project_checks() {
        let mut p = project(1, "Cats");
        assert!(check_project_not_invested(&p).is_ok());

        p.funding.invest(Balance::new(dec!(30)), Utc::now());
        assert!(matches!(
            check_project_not_invested(&p),
            Err(FundError::ProjectInvested(1))
        ));
        assert!(check_new_full_amount(&p, Amount::new(dec!(30)).unwrap()).is_ok());
        assert!(check_new_full_amount(&p, Amount::new(dec!(29)).unwrap()).is_err());
        assert!(check_project_is_open(&p).is_ok());

        p.funding.invest(Balance::new(dec!(70)), Utc::now());
        assert!(matches!(
            check_project_is_open(&p),
            Err(FundError::ProjectClosed(1))
        ));
    }
}

use super::donation::Donation;
use super::funding::{Fundable, oldest_first};
use super::project::CharityProject;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn store(&self, project: CharityProject) -> Result<()>;
    async fn get(&self, id: u32) -> Result<Option<CharityProject>>;
    async fn remove(&self, id: u32) -> Result<Option<CharityProject>>;
    /// Every project, ordered by id.
    async fn get_all(&self) -> Result<Vec<CharityProject>>;

    async fn store_all(&self, projects: Vec<CharityProject>) -> Result<()> {
        for project in projects {
            self.store(project).await?;
        }
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<CharityProject>> {
        Ok(self.get_all().await?.into_iter().find(|p| p.name == name))
    }

    /// Projects still accepting donations, oldest first.
    async fn all_open(&self) -> Result<Vec<CharityProject>> {
        Ok(open_oldest_first(self.get_all().await?))
    }
}

#[async_trait]
pub trait DonationStore: Send + Sync {
    async fn store(&self, donation: Donation) -> Result<()>;
    async fn get(&self, id: u32) -> Result<Option<Donation>>;
    /// Every donation, ordered by id.
    async fn get_all(&self) -> Result<Vec<Donation>>;

    async fn store_all(&self, donations: Vec<Donation>) -> Result<()> {
        for donation in donations {
            self.store(donation).await?;
        }
        Ok(())
    }

    /// Donations not yet fully invested, oldest first.
    async fn all_open(&self) -> Result<Vec<Donation>> {
        Ok(open_oldest_first(self.get_all().await?))
    }

    async fn by_user(&self, user_id: u32) -> Result<Vec<Donation>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|d| d.user_id == user_id)
            .collect())
    }
}

fn open_oldest_first<F: Fundable>(entities: Vec<F>) -> Vec<F> {
    let mut open: Vec<F> = entities
        .into_iter()
        .filter(|e| !e.funding().is_fully_invested())
        .collect();
    open.sort_by(oldest_first);
    open
}

pub type ProjectStoreBox = Box<dyn ProjectStore>;
pub type DonationStoreBox = Box<dyn DonationStore>;

pub type ProjectStoreFactory = Box<dyn Fn() -> ProjectStoreBox + Send + Sync>;
pub type DonationStoreFactory = Box<dyn Fn() -> DonationStoreBox + Send + Sync>;

/// Source of "now" for creation and close dates.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

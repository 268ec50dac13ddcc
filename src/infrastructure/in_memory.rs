use crate::domain::donation::Donation;
use crate::domain::ports::{DonationStore, ProjectStore};
use crate::domain::project::CharityProject;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for charity projects.
///
/// Uses `Arc<RwLock<BTreeMap<u32, CharityProject>>>` so that clones share state and
/// `get_all` comes back ordered by id.
#[derive(Default, Clone)]
pub struct InMemoryProjectStore {
    projects: Arc<RwLock<BTreeMap<u32, CharityProject>>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn store(&self, project: CharityProject) -> Result<()> {
        let mut projects = self.projects.write().await;
        projects.insert(project.id, project);
        Ok(())
    }

    async fn get(&self, id: u32) -> Result<Option<CharityProject>> {
        let projects = self.projects.read().await;
        Ok(projects.get(&id).cloned())
    }

    async fn remove(&self, id: u32) -> Result<Option<CharityProject>> {
        let mut projects = self.projects.write().await;
        Ok(projects.remove(&id))
    }

    async fn get_all(&self) -> Result<Vec<CharityProject>> {
        let projects = self.projects.read().await;
        Ok(projects.values().cloned().collect())
    }

    async fn store_all(&self, batch: Vec<CharityProject>) -> Result<()> {
        let mut projects = self.projects.write().await;
        for project in batch {
            projects.insert(project.id, project);
        }
        Ok(())
    }
}

/// A thread-safe in-memory store for donations.
#[derive(Default, Clone)]
pub struct InMemoryDonationStore {
    donations: Arc<RwLock<BTreeMap<u32, Donation>>>,
}

impl InMemoryDonationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonationStore for InMemoryDonationStore {
    async fn store(&self, donation: Donation) -> Result<()> {
        let mut donations = self.donations.write().await;
        donations.insert(donation.id, donation);
        Ok(())
    }

    async fn get(&self, id: u32) -> Result<Option<Donation>> {
        let donations = self.donations.read().await;
        Ok(donations.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Donation>> {
        let donations = self.donations.read().await;
        Ok(donations.values().cloned().collect())
    }

    async fn store_all(&self, batch: Vec<Donation>) -> Result<()> {
        let mut donations = self.donations.write().await;
        for donation in batch {
            donations.insert(donation.id, donation);
        }
        Ok(())
    }
}

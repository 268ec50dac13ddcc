use crate::domain::donation::Donation;
use crate::domain::ports::{DonationStore, ProjectStore};
use crate::domain::project::CharityProject;
use crate::error::{FundError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for charity projects.
pub const CF_PROJECTS: &str = "projects";
/// Column Family for donations.
pub const CF_DONATIONS: &str = "donations";

/// A persistent store implementation using RocksDB.
///
/// Projects and donations live in separate Column Families, keyed by big-endian id so that
/// iteration yields them ordered by id. Values are JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// "projects" and "donations" column families if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_projects = ColumnFamilyDescriptor::new(CF_PROJECTS, Options::default());
        let cf_donations = ColumnFamilyDescriptor::new(CF_DONATIONS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_projects, cf_donations])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            FundError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn put<T: Serialize>(&self, cf_name: &str, id: u32, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        self.db.put_cf(cf, id.to_be_bytes(), serde_json::to_vec(value)?)?;
        Ok(())
    }

    fn put_batch<T: Serialize>(&self, cf_name: &str, values: &[(u32, T)]) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let mut batch = WriteBatch::default();
        for (id, value) in values {
            batch.put_cf(cf, id.to_be_bytes(), serde_json::to_vec(value)?);
        }
        self.db.write(batch)?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, cf_name: &str, id: u32) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_pinned_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(serde_json::from_slice(&value)?);
        }
        Ok(values)
    }
}

#[async_trait]
impl ProjectStore for RocksDBStore {
    async fn store(&self, project: CharityProject) -> Result<()> {
        self.put(CF_PROJECTS, project.id, &project)
    }

    async fn get(&self, id: u32) -> Result<Option<CharityProject>> {
        self.read(CF_PROJECTS, id)
    }

    async fn remove(&self, id: u32) -> Result<Option<CharityProject>> {
        let existing: Option<CharityProject> = self.read(CF_PROJECTS, id)?;
        if existing.is_some() {
            self.db.delete_cf(self.cf(CF_PROJECTS)?, id.to_be_bytes())?;
        }
        Ok(existing)
    }

    async fn get_all(&self) -> Result<Vec<CharityProject>> {
        self.scan(CF_PROJECTS)
    }

    async fn store_all(&self, projects: Vec<CharityProject>) -> Result<()> {
        let entries: Vec<(u32, CharityProject)> = projects.into_iter().map(|p| (p.id, p)).collect();
        self.put_batch(CF_PROJECTS, &entries)
    }
}

#[async_trait]
impl DonationStore for RocksDBStore {
    async fn store(&self, donation: Donation) -> Result<()> {
        self.put(CF_DONATIONS, donation.id, &donation)
    }

    async fn get(&self, id: u32) -> Result<Option<Donation>> {
        self.read(CF_DONATIONS, id)
    }

    async fn get_all(&self) -> Result<Vec<Donation>> {
        self.scan(CF_DONATIONS)
    }

    async fn store_all(&self, donations: Vec<Donation>) -> Result<()> {
        let entries: Vec<(u32, Donation)> = donations.into_iter().map(|d| (d.id, d)).collect();
        self.put_batch(CF_DONATIONS, &entries)
    }
}

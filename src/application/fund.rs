use super::validators::{
    check_donation_id_free, check_new_full_amount, check_project_exists, check_project_id_free,
    check_project_is_open, check_project_name_free, check_project_not_invested,
};
use super::command::Command;
use crate::domain::allocation::allocate;
use crate::domain::donation::{Donation, DonationDraft};
use crate::domain::funding::{Fundable, Funding, next_sequence};
use crate::domain::ports::{Clock, DonationStoreBox, ProjectStoreBox, system_clock};
use crate::domain::project::{CharityProject, ProjectDraft, ProjectUpdate};
use crate::error::Result;
use tokio::sync::Mutex;
use tracing::{error, info};

/// The charity fund: projects, donations and the allocation between them.
///
/// `CharityFund` owns the storage backends. Every mutating operation holds an internal lock
/// for its whole read-allocate-write sequence, so concurrent creations never invest the same
/// open capacity twice.
///
/// The counterpart batch touched by an allocation is written before the incoming entity. If
/// the incoming write fails, the batch is restored to its pre-allocation state.
pub struct CharityFund {
    projects: ProjectStoreBox,
    donations: DonationStoreBox,
    clock: Clock,
    allocation: Mutex<()>,
}

impl CharityFund {
    /// Creates a new `CharityFund` stamping dates with the system clock.
    ///
    /// # Arguments
    ///
    /// * `projects` - The store for charity projects.
    /// * `donations` - The store for donations.
    pub fn new(projects: ProjectStoreBox, donations: DonationStoreBox) -> Self {
        Self::with_clock(projects, donations, system_clock())
    }

    pub fn with_clock(projects: ProjectStoreBox, donations: DonationStoreBox, clock: Clock) -> Self {
        Self {
            projects,
            donations,
            clock,
            allocation: Mutex::new(()),
        }
    }

    /// Opens a project and immediately invests the open donations into it, oldest first.
    pub async fn create_project(&self, id: u32, draft: ProjectDraft) -> Result<CharityProject> {
        draft.validate()?;
        let name = draft.name.trim().to_string();

        let _guard = self.allocation.lock().await;
        check_project_id_free(self.projects.as_ref(), id).await?;
        check_project_name_free(self.projects.as_ref(), &name, None).await?;

        let now = (self.clock)();
        let sequence = next_sequence(&self.projects.get_all().await?);
        let project = CharityProject {
            id,
            name,
            description: draft.description,
            funding: Funding::new(draft.full_amount, now).with_sequence(sequence),
        };

        let pool = self.donations.all_open().await?;
        let allocation = allocate(project, pool.clone(), now);
        let project = allocation.incoming;
        let previous = previous_states(pool, &allocation.touched);

        self.donations.store_all(allocation.touched).await?;
        if let Err(e) = self.projects.store(project.clone()).await {
            if let Err(restore) = self.donations.store_all(previous).await {
                error!(project = id, error = %restore, "failed to restore donations");
            }
            return Err(e);
        }

        info!(
            project = project.id,
            invested = %project.funding.invested_amount().value(),
            closed = project.funding.is_fully_invested(),
            "project created"
        );
        Ok(project)
    }

    /// Records a donation and immediately invests it into open projects, oldest first.
    pub async fn create_donation(&self, id: u32, draft: DonationDraft) -> Result<Donation> {
        let _guard = self.allocation.lock().await;
        check_donation_id_free(self.donations.as_ref(), id).await?;

        let now = (self.clock)();
        let sequence = next_sequence(&self.donations.get_all().await?);
        let donation = Donation {
            id,
            user_id: draft.user_id,
            comment: draft.comment,
            funding: Funding::new(draft.full_amount, now).with_sequence(sequence),
        };

        let pool = self.projects.all_open().await?;
        let allocation = allocate(donation, pool.clone(), now);
        let donation = allocation.incoming;
        let previous = previous_states(pool, &allocation.touched);

        self.projects.store_all(allocation.touched).await?;
        if let Err(e) = self.donations.store(donation.clone()).await {
            if let Err(restore) = self.projects.store_all(previous).await {
                error!(donation = id, error = %restore, "failed to restore projects");
            }
            return Err(e);
        }

        info!(
            donation = donation.id,
            user = donation.user_id,
            invested = %donation.funding.invested_amount().value(),
            closed = donation.funding.is_fully_invested(),
            "donation created"
        );
        Ok(donation)
    }

    /// Applies an administrative update to an open project.
    ///
    /// Lowering the target to exactly the invested amount closes the project. Raising it does
    /// not pull in open donations; only creations allocate.
    pub async fn update_project(&self, id: u32, update: ProjectUpdate) -> Result<CharityProject> {
        update.validate()?;

        let _guard = self.allocation.lock().await;
        let mut project = check_project_exists(self.projects.as_ref(), id).await?;
        check_project_is_open(&project)?;
        if let Some(full_amount) = update.full_amount {
            check_new_full_amount(&project, full_amount)?;
        }
        let name = update.name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            check_project_name_free(self.projects.as_ref(), name, Some(id)).await?;
        }

        if let Some(full_amount) = update.full_amount {
            project.funding.resize(full_amount, (self.clock)())?;
        }
        if let Some(name) = name {
            project.name = name;
        }
        if let Some(description) = update.description {
            project.description = description;
        }

        self.projects.store(project.clone()).await?;
        info!(
            project = project.id,
            closed = project.funding.is_fully_invested(),
            "project updated"
        );
        Ok(project)
    }

    /// Deletes a project that is still open and has received nothing.
    pub async fn remove_project(&self, id: u32) -> Result<CharityProject> {
        let _guard = self.allocation.lock().await;
        let project = check_project_exists(self.projects.as_ref(), id).await?;
        check_project_is_open(&project)?;
        check_project_not_invested(&project)?;

        self.projects.remove(id).await?;
        info!(project = id, "project removed");
        Ok(project)
    }

    /// Dispatches a command to the matching operation.
    pub async fn execute(&self, command: Command) -> Result<()> {
        match command {
            Command::CreateProject { id, draft } => self.create_project(id, draft).await.map(drop),
            Command::UpdateProject { id, update } => self.update_project(id, update).await.map(drop),
            Command::DeleteProject { id } => self.remove_project(id).await.map(drop),
            Command::Donate { id, draft } => self.create_donation(id, draft).await.map(drop),
        }
    }

    pub async fn projects(&self) -> Result<Vec<CharityProject>> {
        self.projects.get_all().await
    }

    pub async fn donations(&self) -> Result<Vec<Donation>> {
        self.donations.get_all().await
    }

    pub async fn user_donations(&self, user_id: u32) -> Result<Vec<Donation>> {
        self.donations.by_user(user_id).await
    }

    /// Closed projects, fastest funded first.
    pub async fn projects_by_completion_rate(&self) -> Result<Vec<CharityProject>> {
        let mut closed: Vec<CharityProject> = self
            .projects
            .get_all()
            .await?
            .into_iter()
            .filter(|p| p.funding.is_fully_invested())
            .collect();
        closed.sort_by_key(|p| {
            let collection_time = p
                .funding
                .close_date()
                .map(|closed_at| closed_at - p.funding.create_date());
            (collection_time, p.id)
        });
        Ok(closed)
    }
}

/// The pre-allocation state of every pool entry that the allocation touched.
fn previous_states<F: Fundable>(pool: Vec<F>, touched: &[F]) -> Vec<F> {
    pool.into_iter()
        .filter(|p| touched.iter().any(|t| t.id() == p.id()))
        .collect()
}

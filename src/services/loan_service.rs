//! Loan application service - creation, review and role-scoped listing.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

use super::guard::enforce;
use crate::domain::{
    list_scope, Actor, ApplicationFilter, LoanApplication, LoanApplicationView, LoanStatus,
    Operation, Revision, UserSummary,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Partial update to an application.
///
/// `amount`/`purpose` are owner edits; `status` is a review decision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationUpdate {
    pub amount: Option<f64>,
    pub purpose: Option<String>,
    pub status: Option<LoanStatus>,
}

impl ApplicationUpdate {
    fn revision(&self) -> Option<Revision> {
        let revision = Revision {
            amount: self.amount,
            purpose: self.purpose.clone(),
        };
        (!revision.is_empty()).then_some(revision)
    }
}

/// Loan application service trait for dependency injection.
#[async_trait]
pub trait LoanService: Send + Sync {
    /// Applications visible to `actor`, newest first, narrowed by `filter`
    async fn list(
        &self,
        actor: &Actor,
        filter: ApplicationFilter,
    ) -> AppResult<Vec<LoanApplicationView>>;

    /// Single application with owner and reviewer details
    async fn get(&self, actor: &Actor, id: Uuid) -> AppResult<LoanApplicationView>;

    /// Open a new pending application owned by `actor`
    async fn create(&self, actor: &Actor, amount: f64, purpose: String)
        -> AppResult<LoanApplication>;

    /// Owner edits and/or a review decision
    async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        update: ApplicationUpdate,
    ) -> AppResult<LoanApplication>;

    /// Permanently remove an application
    async fn delete(&self, actor: &Actor, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of LoanService using Unit of Work.
pub struct LoanManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LoanManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn load(&self, id: Uuid) -> AppResult<LoanApplication> {
        self.uow
            .loan_applications()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    /// Attach owner and reviewer summaries with one user lookup.
    async fn annotate(
        &self,
        applications: Vec<LoanApplication>,
    ) -> AppResult<Vec<LoanApplicationView>> {
        let ids: BTreeSet<Uuid> = applications
            .iter()
            .flat_map(|app| std::iter::once(app.user_id).chain(app.verified_by))
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let people: HashMap<Uuid, UserSummary> = self
            .uow
            .users()
            .find_by_ids(ids.into_iter().collect())
            .await?
            .iter()
            .map(|user| (user.id, UserSummary::from(user)))
            .collect();

        Ok(applications
            .into_iter()
            .map(|app| {
                let owner = people.get(&app.user_id).cloned();
                let verifier = app.verified_by.and_then(|id| people.get(&id).cloned());
                LoanApplicationView::new(app, owner, verifier)
            })
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> LoanService for LoanManager<U> {
    async fn list(
        &self,
        actor: &Actor,
        filter: ApplicationFilter,
    ) -> AppResult<Vec<LoanApplicationView>> {
        enforce(actor, Operation::ListApplications)?;
        let scope = list_scope(Some(actor))?;

        let applications = self.uow.loan_applications().list(scope).await?;
        let views = self.annotate(applications).await?;
        Ok(filter.apply(views))
    }

    async fn get(&self, actor: &Actor, id: Uuid) -> AppResult<LoanApplicationView> {
        let application = self.load(id).await?;
        enforce(actor, Operation::ReadApplication(&application))?;

        self.annotate(vec![application])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("Annotated view missing"))
    }

    async fn create(
        &self,
        actor: &Actor,
        amount: f64,
        purpose: String,
    ) -> AppResult<LoanApplication> {
        enforce(actor, Operation::CreateApplication)?;

        let application = LoanApplication::new(actor.id, amount, &purpose)?;
        let application = self.uow.loan_applications().insert(application).await?;
        tracing::info!(
            application_id = %application.id,
            user_id = %actor.id,
            amount = application.amount,
            "Loan application created"
        );
        Ok(application)
    }

    async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        update: ApplicationUpdate,
    ) -> AppResult<LoanApplication> {
        let mut application = self.load(id).await?;

        let revision = update.revision();
        if revision.is_none() && update.status.is_none() {
            // Strangers are refused before the body is judged.
            enforce(actor, Operation::ReadApplication(&application))?;
            return Err(AppError::validation("Nothing to update"));
        }

        if let Some(revision) = revision {
            enforce(actor, Operation::EditApplication(&application))?;
            application.revise(revision)?;
        }

        if let Some(status) = update.status {
            enforce(actor, Operation::ChangeStatus(&application))?;
            application.review(status, actor.id)?;
        }

        let application = self.uow.loan_applications().save(application).await?;
        tracing::info!(
            application_id = %application.id,
            actor_id = %actor.id,
            status = %application.status,
            "Loan application updated"
        );
        Ok(application)
    }

    async fn delete(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        let application = self.load(id).await?;
        enforce(actor, Operation::DeleteApplication(&application))?;

        self.uow.loan_applications().delete(id).await?;
        tracing::info!(application_id = %id, actor_id = %actor.id, "Loan application deleted");
        Ok(())
    }
}

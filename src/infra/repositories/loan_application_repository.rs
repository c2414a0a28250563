//! Loan application repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::loan_application::{self, ActiveModel, Entity as LoanApplicationEntity};
use crate::domain::{ListScope, LoanApplication};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Loan application repository trait for dependency injection.
///
/// Each write touches a single row; concurrent writers race last-write-wins.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LoanApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LoanApplication>>;

    /// List applications visible in `scope`, newest first
    async fn list(&self, scope: ListScope) -> AppResult<Vec<LoanApplication>>;

    /// Persist a new application
    async fn insert(&self, application: LoanApplication) -> AppResult<LoanApplication>;

    /// Overwrite the stored fields of an existing application
    async fn save(&self, application: LoanApplication) -> AppResult<LoanApplication>;

    /// Permanently delete an application
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed loan application repository
pub struct LoanApplicationStore {
    db: DatabaseConnection,
}

impl LoanApplicationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LoanApplicationRepository for LoanApplicationStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LoanApplication>> {
        let result = LoanApplicationEntity::find_by_id(id).one(&self.db).await?;
        result.map(LoanApplication::try_from).transpose()
    }

    async fn list(&self, scope: ListScope) -> AppResult<Vec<LoanApplication>> {
        let mut query = LoanApplicationEntity::find();
        if let ListScope::OwnedBy(owner) = scope {
            query = query.filter(loan_application::Column::UserId.eq(owner));
        }

        let models = query
            .order_by_desc(loan_application::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(LoanApplication::try_from).collect()
    }

    async fn insert(&self, application: LoanApplication) -> AppResult<LoanApplication> {
        let model = ActiveModel::from(application).insert(&self.db).await?;
        LoanApplication::try_from(model)
    }

    async fn save(&self, application: LoanApplication) -> AppResult<LoanApplication> {
        let mut active = ActiveModel::from(application);
        // Creation time is immutable.
        active.created_at = sea_orm::ActiveValue::NotSet;

        let model = active.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => AppError::NotFound,
            other => AppError::from(other),
        })?;
        LoanApplication::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = LoanApplicationEntity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

//! Loan application database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{LoanApplication, LoanStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loan_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user; no cascade on account deletion
    pub user_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    #[sea_orm(column_type = "Text")]
    pub purpose: String,
    pub status: String,
    pub verified_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A row whose status is unknown is refused rather than reopened as pending.
impl TryFrom<Model> for LoanApplication {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status: LoanStatus = model.status.parse().map_err(|_| {
            tracing::error!(application_id = %model.id, status = %model.status, "Unknown stored status");
            AppError::internal(format!("Application {} has an unknown status", model.id))
        })?;

        Ok(LoanApplication {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            purpose: model.purpose,
            status,
            verified_by: model.verified_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<LoanApplication> for ActiveModel {
    fn from(application: LoanApplication) -> Self {
        use sea_orm::Set;

        ActiveModel {
            id: Set(application.id),
            user_id: Set(application.user_id),
            amount: Set(application.amount),
            purpose: Set(application.purpose),
            status: Set(application.status.as_str().to_string()),
            verified_by: Set(application.verified_by),
            created_at: Set(application.created_at),
            updated_at: Set(application.updated_at),
        }
    }
}

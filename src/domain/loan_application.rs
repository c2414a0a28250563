//! Loan application entity and its status state machine.
//!
//! `pending` is the only state in which the owner may revise an application.
//! Review moves it to `verified` or `rejected` and stamps the reviewer; there
//! is no way back to `pending`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::policy::Denial;
use super::user::UserSummary;
use crate::config::{MAX_PURPOSE_LENGTH, STATUS_PENDING, STATUS_REJECTED, STATUS_VERIFIED};
use crate::errors::{AppError, AppResult};

/// Review status of an application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => STATUS_PENDING,
            LoanStatus::Verified => STATUS_VERIFIED,
            LoanStatus::Rejected => STATUS_REJECTED,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoanStatus::Pending)
    }
}

impl FromStr for LoanStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(LoanStatus::Pending),
            STATUS_VERIFIED => Ok(LoanStatus::Verified),
            STATUS_REJECTED => Ok(LoanStatus::Rejected),
            other => Err(AppError::validation(format!(
                "Invalid status '{}'. Must be 'pending', 'verified' or 'rejected'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loan application aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanApplication {
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    #[schema(example = 5000.0)]
    pub amount: f64,
    #[schema(example = "Tuition")]
    pub purpose: String,
    pub status: LoanStatus,
    /// Reviewer who last moved the application out of `pending`
    pub verified_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner-side changes to a pending application
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Revision {
    pub amount: Option<f64>,
    pub purpose: Option<String>,
}

impl Revision {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.purpose.is_none()
    }
}

impl LoanApplication {
    /// Open a new pending application for `owner`.
    pub fn new(owner: Uuid, amount: f64, purpose: &str) -> AppResult<Self> {
        validate_amount(amount)?;
        let purpose = validate_purpose(purpose)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: owner,
            amount,
            purpose,
            status: LoanStatus::Pending,
            verified_by: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Apply owner edits. Only allowed while pending; the record is untouched on error.
    pub fn revise(&mut self, revision: Revision) -> AppResult<()> {
        if !self.is_pending() {
            return Err(Denial::NotPending.into());
        }
        if revision.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }

        if let Some(amount) = revision.amount {
            validate_amount(amount)?;
        }
        let purpose = revision.purpose.as_deref().map(validate_purpose).transpose()?;

        if let Some(amount) = revision.amount {
            self.amount = amount;
        }
        if let Some(purpose) = purpose {
            self.purpose = purpose;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record a review decision. `reviewer` always replaces any earlier reviewer.
    pub fn review(&mut self, status: LoanStatus, reviewer: Uuid) -> AppResult<()> {
        if status.is_pending() {
            return Err(AppError::validation(
                "Status can only be set to 'verified' or 'rejected'",
            ));
        }

        self.status = status;
        self.verified_by = Some(reviewer);
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Amount must be a finite number above zero.
pub fn validate_amount(amount: f64) -> AppResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(AppError::validation("Amount must be a positive number"))
    }
}

/// Purpose must contain non-whitespace text; returns the trimmed value.
pub fn validate_purpose(purpose: &str) -> AppResult<String> {
    let trimmed = purpose.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Purpose is required"));
    }
    if trimmed.chars().count() > MAX_PURPOSE_LENGTH as usize {
        return Err(AppError::validation(format!(
            "Purpose must be at most {} characters",
            MAX_PURPOSE_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Application annotated with owner and reviewer details for list/detail views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanApplicationView {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = 5000.0)]
    pub amount: f64,
    #[schema(example = "Tuition")]
    pub purpose: String,
    pub status: LoanStatus,
    pub verified_by: Option<Uuid>,
    /// Owner details; absent if the owning account was deleted
    pub owner: Option<UserSummary>,
    /// Reviewer details when the application has been reviewed
    pub verifier: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LoanApplicationView {
    pub fn new(
        application: LoanApplication,
        owner: Option<UserSummary>,
        verifier: Option<UserSummary>,
    ) -> Self {
        Self {
            id: application.id,
            user_id: application.user_id,
            amount: application.amount,
            purpose: application.purpose,
            status: application.status,
            verified_by: application.verified_by,
            owner,
            verifier,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

//! Search and status filtering over annotated application lists.

use serde::Deserialize;
use utoipa::IntoParams;

use super::loan_application::{LoanApplicationView, LoanStatus};

/// Optional list filters, applied after role scoping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationFilter {
    /// Case-insensitive substring over owner name/email, purpose and status
    pub search: Option<String>,
    /// Exact status match
    pub status: Option<LoanStatus>,
}

impl ApplicationFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            status: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.needle().is_none()
    }

    pub fn matches(&self, view: &LoanApplicationView) -> bool {
        if let Some(status) = self.status {
            if view.status != status {
                return false;
            }
        }

        let Some(needle) = self.needle() else {
            return true;
        };

        let owner = view.owner.as_ref();
        let haystacks = [
            owner.and_then(|o| o.name.as_deref()),
            owner.map(|o| o.email.as_str()),
            Some(view.purpose.as_str()),
            Some(view.status.as_str()),
        ];

        haystacks
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Keep the views that match, preserving order.
    pub fn apply(&self, views: Vec<LoanApplicationView>) -> Vec<LoanApplicationView> {
        if self.is_empty() {
            return views;
        }
        views.into_iter().filter(|v| self.matches(v)).collect()
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

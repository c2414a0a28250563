//! Per-session capability set derived from the actor's role.
//!
//! Resolved once when a session is inspected so views can branch on flags
//! rather than comparing role strings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Capabilities {
    /// May submit new loan applications
    pub can_apply: bool,
    /// Sees every application rather than only their own
    pub can_view_all_applications: bool,
    /// May verify or reject applications
    pub can_verify: bool,
    /// May list users, change roles and delete accounts
    pub can_manage_users: bool,
}

impl Capabilities {
    pub fn for_role(role: UserRole) -> Self {
        Self {
            can_apply: role == UserRole::User,
            can_view_all_applications: role.can_review(),
            can_verify: role.can_review(),
            can_manage_users: role.is_admin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_capabilities() {
        let caps = Capabilities::for_role(UserRole::User);
        assert!(caps.can_apply);
        assert!(!caps.can_view_all_applications);
        assert!(!caps.can_verify);
        assert!(!caps.can_manage_users);
    }

    #[test]
    fn test_verifier_capabilities() {
        let caps = Capabilities::for_role(UserRole::Verifier);
        assert!(!caps.can_apply);
        assert!(caps.can_verify);
        assert!(caps.can_view_all_applications);
        assert!(!caps.can_manage_users);
    }

    #[test]
    fn test_admin_capabilities() {
        let caps = Capabilities::for_role(UserRole::Admin);
        assert!(!caps.can_apply);
        assert!(caps.can_verify);
        assert!(caps.can_manage_users);
    }
}

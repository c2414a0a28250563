//! User service - admin-only account management.
//!
//! Per-record operations load the target first, so an absent id is reported
//! as not found before the role check runs.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::guard::enforce;
use crate::domain::{Actor, Operation, User, UserRole};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users (admin only)
    async fn list_users(&self, actor: &Actor) -> AppResult<Vec<User>>;

    /// Replace a user's role (admin only)
    async fn change_role(&self, actor: &Actor, id: Uuid, role: UserRole) -> AppResult<User>;

    /// Delete another user's account (admin only)
    async fn delete_user(&self, actor: &Actor, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self, actor: &Actor) -> AppResult<Vec<User>> {
        enforce(actor, Operation::ListUsers)?;
        self.uow.users().list().await
    }

    async fn change_role(&self, actor: &Actor, id: Uuid, role: UserRole) -> AppResult<User> {
        let target = self.uow.users().find_by_id(id).await?.ok_or_not_found()?;
        enforce(actor, Operation::ChangeUserRole { target: target.id })?;

        let user = self.uow.users().update_role(id, role).await?;
        tracing::info!(
            actor_id = %actor.id,
            user_id = %id,
            from = %target.role,
            to = %role,
            "User role changed"
        );
        Ok(user)
    }

    async fn delete_user(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        let target = self.uow.users().find_by_id(id).await?.ok_or_not_found()?;
        enforce(actor, Operation::DeleteUser { target: target.id })?;

        self.uow.users().delete(id).await?;
        tracing::info!(actor_id = %actor.id, user_id = %id, "User deleted");
        Ok(())
    }
}

//! Accounts command - create accounts and change roles without the HTTP API.
//!
//! Public sign-up only ever produces `user` accounts, so this is how the first
//! admin and any verifiers come to exist.

use std::sync::Arc;

use crate::cli::args::{AccountsAction, AccountsArgs};
use crate::config::Config;
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::services::{normalize_email, AuthService, Authenticator, NewAccount};

/// Execute the accounts command
pub async fn execute(args: AccountsArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));

    match args.action {
        AccountsAction::Create {
            email,
            password,
            name,
            role,
        } => {
            let auth = Authenticator::new(uow, config);
            let user = auth
                .create_account(NewAccount {
                    name,
                    email,
                    password,
                    role: role.into(),
                })
                .await?;
            println!("Created {} ({}) with id {}", user.email, user.role, user.id);
        }
        AccountsAction::SetRole { email, role } => {
            let users = uow.users();
            let user = users
                .find_by_email(&normalize_email(&email))
                .await?
                .ok_or_not_found()?;
            let user = users.update_role(user.id, role.into()).await?;
            tracing::info!(user_id = %user.id, role = %user.role, "Role set from CLI");
            println!("{} is now {}", user.email, user.role);
        }
    }

    Ok(())
}

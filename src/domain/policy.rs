//! Authorization policy for loan applications and user management.
//!
//! Pure functions over an explicit [`Actor`]; no I/O and no ambient session.
//! Callers load the target record first, so absence surfaces as not-found
//! before any ownership or role decision is made.

use uuid::Uuid;

use super::loan_application::LoanApplication;
use super::user::UserRole;

/// The authenticated identity making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }
}

/// Operations subject to authorization, carrying the target where one exists.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    ListApplications,
    ReadApplication(&'a LoanApplication),
    CreateApplication,
    EditApplication(&'a LoanApplication),
    ChangeStatus(&'a LoanApplication),
    DeleteApplication(&'a LoanApplication),
    ListUsers,
    ChangeUserRole { target: Uuid },
    DeleteUser { target: Uuid },
}

impl Operation<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListApplications => "list_applications",
            Operation::ReadApplication(_) => "read_application",
            Operation::CreateApplication => "create_application",
            Operation::EditApplication(_) => "edit_application",
            Operation::ChangeStatus(_) => "change_status",
            Operation::DeleteApplication(_) => "delete_application",
            Operation::ListUsers => "list_users",
            Operation::ChangeUserRole { .. } => "change_user_role",
            Operation::DeleteUser { .. } => "delete_user",
        }
    }
}

/// Why an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No session
    Unauthenticated,
    /// The actor's role never grants this operation
    RoleNotPermitted,
    /// The operation is reserved to the owner (or a privileged role)
    NotOwner,
    /// The application has left `pending`
    NotPending,
    /// Admins may not delete their own account
    SelfDeletion,
}

impl Denial {
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::Unauthenticated => "unauthenticated",
            Denial::RoleNotPermitted => "role not permitted",
            Denial::NotOwner => "not the owner",
            Denial::NotPending => "application is not pending",
            Denial::SelfDeletion => "self deletion",
        }
    }
}

/// Which applications a list request may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    OwnedBy(Uuid),
}

/// Decide whether `actor` may perform `operation`. First matching rule wins.
pub fn authorize(actor: Option<&Actor>, operation: Operation<'_>) -> Result<(), Denial> {
    let actor = actor.ok_or(Denial::Unauthenticated)?;

    match operation {
        Operation::ListApplications => Ok(()),

        Operation::ReadApplication(app) => {
            if actor.role.can_review() || app.is_owned_by(actor.id) {
                Ok(())
            } else {
                Err(Denial::NotOwner)
            }
        }

        Operation::CreateApplication => require(actor.role == UserRole::User),

        Operation::EditApplication(app) => {
            if !app.is_owned_by(actor.id) {
                Err(Denial::NotOwner)
            } else if !app.is_pending() {
                Err(Denial::NotPending)
            } else {
                Ok(())
            }
        }

        Operation::ChangeStatus(_) => require(actor.role.can_review()),

        Operation::DeleteApplication(app) => {
            if actor.role.is_admin() {
                Ok(())
            } else if !app.is_owned_by(actor.id) {
                Err(Denial::NotOwner)
            } else if !app.is_pending() {
                Err(Denial::NotPending)
            } else {
                Ok(())
            }
        }

        Operation::ListUsers | Operation::ChangeUserRole { .. } => require(actor.role.is_admin()),

        Operation::DeleteUser { target } => {
            require(actor.role.is_admin())?;
            if target == actor.id {
                Err(Denial::SelfDeletion)
            } else {
                Ok(())
            }
        }
    }
}

/// Narrow the application list to what `actor` may see.
pub fn list_scope(actor: Option<&Actor>) -> Result<ListScope, Denial> {
    let actor = actor.ok_or(Denial::Unauthenticated)?;
    if actor.role.can_review() {
        Ok(ListScope::All)
    } else {
        Ok(ListScope::OwnedBy(actor.id))
    }
}

fn require(allowed: bool) -> Result<(), Denial> {
    if allowed {
        Ok(())
    } else {
        Err(Denial::RoleNotPermitted)
    }
}

//! Policy enforcement with audit logging.

use crate::domain::{authorize, Actor, Operation};
use crate::errors::AppResult;

/// Run the authorization policy and log the decision.
pub(crate) fn enforce(actor: &Actor, operation: Operation<'_>) -> AppResult<()> {
    match authorize(Some(actor), operation) {
        Ok(()) => {
            tracing::debug!(
                event = "authz_granted",
                actor_id = %actor.id,
                role = %actor.role,
                operation = operation.name(),
                "Authorization granted"
            );
            Ok(())
        }
        Err(denial) => {
            tracing::warn!(
                event = "authz_denied",
                actor_id = %actor.id,
                role = %actor.role,
                operation = operation.name(),
                reason = denial.reason(),
                "Authorization denied"
            );
            Err(denial.into())
        }
    }
}

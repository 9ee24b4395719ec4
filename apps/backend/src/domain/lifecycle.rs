//! Game status transitions.

use crate::entities::games::GameStatus;
use crate::errors::domain::{DomainError, ValidationKind};

/// Status may only move forward: pending -> started -> ended (pending -> ended allowed).
pub fn check_transition(from: GameStatus, to: GameStatus) -> Result<(), DomainError> {
    if to.rank() > from.rank() {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidStatusTransition,
            format!(
                "Cannot move game from {} to {}",
                from.as_str(),
                to.as_str()
            ),
        ))
    }
}

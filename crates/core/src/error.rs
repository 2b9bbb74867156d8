use crate::roles::Role;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Content item {id} is dissolved and accepts no further changes")]
    Dissolved { id: DbId },

    #[error("Person {person_id} holds role {actual}, expected {expected}")]
    RoleMismatch {
        person_id: DbId,
        expected: Role,
        actual: Role,
    },

    #[error("No eligible person holds role {0}")]
    NoEligiblePerson(Role),

    #[error("At least one team member must be assigned")]
    EmptyAssignment,

    #[error("Internal error: {0}")]
    Internal(String),
}

//! Person row model and DTOs.

use reelflow_core::assignment::Candidate;
use reelflow_core::error::CoreError;
use reelflow_core::person::Person;
use reelflow_core::roles::Role;
use reelflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonRow {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_trusted_writer: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<PersonRow> for Person {
    type Error = CoreError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|e| {
            CoreError::Internal(format!("Stored person {} is malformed: {e}", row.id))
        })?;
        Ok(Person {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            role,
            is_trusted_writer: row.is_trusted_writer,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

/// A person together with their current active assignment count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonWorkload {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_trusted_writer: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub active_assignments: i64,
}

impl TryFrom<PersonWorkload> for Candidate {
    type Error = CoreError;

    fn try_from(row: PersonWorkload) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|e| {
            CoreError::Internal(format!("Stored person {} is malformed: {e}", row.id))
        })?;
        Ok(Candidate {
            person: Person {
                id: row.id,
                email: row.email,
                full_name: row.full_name,
                role,
                is_trusted_writer: row.is_trusted_writer,
                is_active: row.is_active,
                created_at: row.created_at,
            },
            active_assignments: row.active_assignments,
        })
    }
}

/// DTO for creating a new person.
#[derive(Debug, Deserialize)]
pub struct CreatePerson {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub is_trusted_writer: bool,
}

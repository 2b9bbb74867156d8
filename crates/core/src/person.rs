//! Team members as seen by the workflow engine.

use serde::{Deserialize, Serialize};

use crate::roles::{Actor, Role};
use crate::types::{DbId, Timestamp};

/// A team member from the person registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    /// Submissions by this person skip the manual review queue.
    pub is_trusted_writer: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Person {
    pub fn as_actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

//! Team roles and the acting identity.
//!
//! Role names are parsed once at the system boundary into [`Role`]; nothing
//! downstream compares role strings.

use serde::{Deserialize, Serialize};

use crate::macros::define_workflow_enum;
use crate::types::DbId;

define_workflow_enum! {
    /// A team member's role in the production pipeline.
    Role, "role" {
        ScriptWriter = "SCRIPT_WRITER",
        Videographer = "VIDEOGRAPHER",
        Editor = "EDITOR",
        PostingManager = "POSTING_MANAGER",
        Admin = "ADMIN",
        SuperAdmin = "SUPER_ADMIN",
    }
}

impl Role {
    /// Roles that can hold an assignment slot on a content item.
    pub const ASSIGNABLE: &'static [Role] =
        &[Role::Videographer, Role::Editor, Role::PostingManager];

    /// Admins review scripts and may drive any stage transition.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    /// Whether this role has an assignment slot on content items.
    pub fn is_assignable(self) -> bool {
        Self::ASSIGNABLE.contains(&self)
    }
}

/// The identity performing a workflow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: DbId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

//! Assignment of videographers, editors and posting managers.
//!
//! A request names up to three slots; each slot is filled either with an
//! explicit person or by auto-assignment to the least-loaded active member
//! of the role. The lookups themselves live with the engine; this module
//! holds the selection rules.

use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::error::CoreError;
use crate::person::Person;
use crate::roles::{Actor, Role};
use crate::stage::{ProductionStage, ReviewStatus};
use crate::types::{DbId, Timestamp};

/// How a single assignment slot should be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentChoice {
    Explicit { person_id: DbId },
    Auto,
}

/// Slots to fill on a content item. At least one must be present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub videographer: Option<AssignmentChoice>,
    pub editor: Option<AssignmentChoice>,
    pub posting_manager: Option<AssignmentChoice>,
}

impl AssignmentRequest {
    /// The requested slots in role order.
    pub fn slots(&self) -> Vec<(Role, AssignmentChoice)> {
        [
            (Role::Videographer, self.videographer),
            (Role::Editor, self.editor),
            (Role::PostingManager, self.posting_manager),
        ]
        .into_iter()
        .filter_map(|(role, choice)| choice.map(|c| (role, c)))
        .collect()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.slots().is_empty() {
            return Err(CoreError::EmptyAssignment);
        }
        Ok(())
    }
}

/// A person together with their current count of active assigned items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub person: Person,
    pub active_assignments: i64,
}

/// Check that an explicitly chosen person can fill the slot for `role`.
pub fn check_assignable(person: &Person, role: Role) -> Result<(), CoreError> {
    if person.role != role {
        return Err(CoreError::RoleMismatch {
            person_id: person.id,
            expected: role,
            actual: person.role,
        });
    }
    if !person.is_active {
        return Err(CoreError::Validation(format!(
            "Person {} is inactive and cannot be assigned",
            person.id
        )));
    }
    Ok(())
}

/// Pick the active member of `role` with the fewest active assignments.
///
/// Ties go to the earliest-created person, then the lowest id.
pub fn pick_least_loaded(role: Role, candidates: &[Candidate]) -> Result<&Person, CoreError> {
    candidates
        .iter()
        .filter(|c| c.person.role == role && c.person.is_active)
        .min_by_key(|c| (c.active_assignments, c.person.created_at, c.person.id))
        .map(|c| &c.person)
        .ok_or(CoreError::NoEligiblePerson(role))
}

/// Admins may assign anyone. Other roles may only pick up work by
/// assigning themselves to the slot of their own role.
pub fn authorize_assignment(request: &AssignmentRequest, actor: &Actor) -> Result<(), CoreError> {
    if actor.is_admin() {
        return Ok(());
    }

    match request.slots().as_slice() {
        [(role, AssignmentChoice::Explicit { person_id })]
            if *role == actor.role && *person_id == actor.id =>
        {
            Ok(())
        }
        _ => Err(CoreError::Forbidden(
            "Only admins can assign other team members".to_string(),
        )),
    }
}

/// Write resolved assignees onto `item` and record the change.
///
/// Non-admins may fill an empty slot or re-confirm their own; a slot held
/// by someone else is only reassigned by an admin.
pub fn apply_assignment(
    item: &ContentItem,
    resolved: &[(Role, Person)],
    actor: &Actor,
    at: Timestamp,
) -> Result<ContentItem, CoreError> {
    item.ensure_not_dissolved()?;

    if resolved.is_empty() {
        return Err(CoreError::EmptyAssignment);
    }

    if item.status != ReviewStatus::Approved {
        return Err(CoreError::InvalidTransition(format!(
            "Content item {} is {}; only approved content can be assigned",
            item.id, item.status
        )));
    }

    if item.production_stage == Some(ProductionStage::Posted) {
        return Err(CoreError::InvalidTransition(format!(
            "Content item {} is already posted",
            item.id
        )));
    }

    let mut next = item.clone();
    let mut parts = Vec::with_capacity(resolved.len());
    for (role, person) in resolved {
        if !actor.is_admin() {
            match item.assignees.get(*role) {
                Some(holder) if holder != person.id => {
                    return Err(CoreError::Forbidden(format!(
                        "The {role} slot on content item {} is held by person {holder}",
                        item.id
                    )))
                }
                _ => {}
            }
        }
        next.assignees.set(*role, person.id)?;
        parts.push(format!("{role}: {} #{}", person.full_name, person.id));
    }

    Ok(next.with_remark(
        &format!(
            "Assigned by {} #{}: {}",
            actor.role,
            actor.id,
            parts.join(", ")
        ),
        at,
    ))
}
